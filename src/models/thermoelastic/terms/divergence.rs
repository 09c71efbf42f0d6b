use nalgebra::Vector3;

use crate::support::{
    profile::FunctionTable,
    quadrature::{CoupledFields, LookupError, MaterialProperties, QuadraturePoint},
    schema::{ConfigError, Requirement, Schema, Validated},
};

use super::{EvaluationError, Term};

/// Three scalar fields treated as the x, y, and z components of one vector field.
///
/// Reads axis 0 of the first field, axis 1 of the second, and axis 2 of the
/// third, which is exactly the divergence of the assembled vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFields {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl ComponentFields {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// Binds the three component slots named by `slots` from a validated setup.
    pub(super) fn bind(setup: &Validated<'_>, slots: [&str; 3]) -> Result<Self, ConfigError> {
        Ok(Self::new(
            setup.field(slots[0])?,
            setup.field(slots[1])?,
            setup.field(slots[2])?,
        ))
    }

    /// Returns `(∂₀x, ∂₁y, ∂₂z)`, the axis-matching derivative of each component.
    pub(super) fn diagonal(
        &self,
        fields: &dyn CoupledFields,
        qp: usize,
    ) -> Result<Vector3<f64>, LookupError> {
        Ok(Vector3::new(
            fields.gradient(&self.x, qp)?[0],
            fields.gradient(&self.y, qp)?[1],
            fields.gradient(&self.z, qp)?[2],
        ))
    }
}

/// How the divergence operand is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DivergenceForm {
    /// A single coupled field whose gradient components are summed.
    Vector { field: String },
    /// Three scalar component fields.
    Components(ComponentFields),
}

/// Divergence of a velocity or stress-rate field tested against `ψ`.
///
/// Both forms compute `Σₖ dₖ·ψ` with `dₖ` the axis-`k` derivative, so they
/// agree exactly when the components are those of the single vector field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    form: DivergenceForm,
}

impl Divergence {
    pub const NAME: &'static str = "ModDiv";

    /// Slot of the single-vector form.
    pub const VECTOR_SLOT: &'static str = "velocity";

    /// Slots of the three-scalar form.
    pub const COMPONENT_SLOTS: [&'static str; 3] = ["vx", "vy", "vz"];

    #[must_use]
    pub fn vector(field: impl Into<String>) -> Self {
        Self {
            form: DivergenceForm::Vector {
                field: field.into(),
            },
        }
    }

    #[must_use]
    pub fn components(components: ComponentFields) -> Self {
        Self {
            form: DivergenceForm::Components(components),
        }
    }

    #[must_use]
    pub fn form(&self) -> &DivergenceForm {
        &self.form
    }

    /// Accepts either the single-vector or the three-scalar form.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(Self::NAME).require_coupled(Requirement::one_of(&[
            &[Self::VECTOR_SLOT],
            &Self::COMPONENT_SLOTS,
        ]))
    }

    /// The three-scalar form on its own, the base of the Lamé-weighted terms.
    #[must_use]
    pub fn component_schema() -> Schema {
        Schema::new(Self::NAME)
            .require_coupled(Requirement::all(&Self::COMPONENT_SLOTS))
    }

    pub(super) fn build(
        setup: &Validated<'_>,
        _functions: &FunctionTable,
    ) -> Result<Box<dyn Term>, ConfigError> {
        let term = match setup.coupled_form(0) {
            Some(0) => Self::vector(setup.field(Self::VECTOR_SLOT)?),
            _ => Self::components(ComponentFields::bind(setup, Self::COMPONENT_SLOTS)?),
        };
        Ok(Box::new(term))
    }

    fn derivatives(
        &self,
        fields: &dyn CoupledFields,
        qp: usize,
    ) -> Result<Vector3<f64>, LookupError> {
        match &self.form {
            DivergenceForm::Vector { field } => fields.gradient(field, qp),
            DivergenceForm::Components(components) => components.diagonal(fields, qp),
        }
    }
}

impl Term for Divergence {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schema(&self) -> Schema {
        Self::schema()
    }

    fn residual(
        &self,
        qp: &QuadraturePoint,
        fields: &dyn CoupledFields,
        _properties: &dyn MaterialProperties,
    ) -> Result<f64, EvaluationError> {
        let d = self
            .derivatives(fields, qp.index)
            .map_err(EvaluationError::lookup(Self::NAME, qp.index))?;
        let test = qp.test;

        Ok(d[0] * test + d[1] * test + d[2] * test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::models::thermoelastic::{material::PropertyTable, test_support::GradientTable};
    use crate::support::schema::TermParameters;

    fn split() -> Divergence {
        Divergence::components(ComponentFields::new("u", "v", "w"))
    }

    #[test]
    fn sums_axis_matching_derivatives() {
        let fields = GradientTable::new(1)
            .with_uniform("u", [1.0, 10.0, 10.0])
            .with_uniform("v", [10.0, 2.0, 10.0])
            .with_uniform("w", [10.0, 10.0, 3.0]);
        let qp = QuadraturePoint::new(0, 0.5);

        let r = split()
            .residual(&qp, &fields, &PropertyTable::new(1))
            .unwrap();
        assert_relative_eq!(r, 3.0);
    }

    #[test]
    fn vector_form_sums_all_components() {
        let fields = GradientTable::new(2)
            .with_uniform("velocity", [1.0, -2.0, 4.0]);
        let qp = QuadraturePoint::new(1, 2.0);

        let r = Divergence::vector("velocity")
            .residual(&qp, &fields, &PropertyTable::new(2))
            .unwrap();
        assert_relative_eq!(r, 6.0);
    }

    #[test]
    fn build_follows_declared_fields() {
        let schema = Divergence::schema();
        let functions = FunctionTable::new();

        let params = TermParameters::new().couple("velocity", "v");
        let setup = schema.validate(&params).unwrap();
        let term = Divergence::build(&setup, &functions).unwrap();
        assert_eq!(
            format!("{term:?}"),
            format!("{:?}", Divergence::vector("v"))
        );

        let params = TermParameters::new()
            .couple("vx", "u")
            .couple("vy", "v")
            .couple("vz", "w");
        let setup = schema.validate(&params).unwrap();
        let term = Divergence::build(&setup, &functions).unwrap();
        assert_eq!(format!("{term:?}"), format!("{split:?}", split = split()));
    }

    #[test]
    fn partial_components_beside_vector_are_rejected() {
        let params = TermParameters::new()
            .couple("velocity", "v")
            .couple("vx", "u")
            .couple("vy", "v");

        let err = Divergence::schema().validate(&params).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnusedCoupled {
                term: "ModDiv".into(),
                slot: "vx".into(),
            }
        );
    }

    proptest! {
        #[test]
        fn forms_agree_on_linear_fields(
            a in -1.0e3..1.0e3f64,
            b in -1.0e3..1.0e3f64,
            c in -1.0e3..1.0e3f64,
            test in -10.0..10.0f64,
        ) {
            let fields = GradientTable::new(1)
                .with_uniform("velocity", [a, b, c])
                .with_linear_components(["u", "v", "w"], [a, b, c]);
            let properties = PropertyTable::new(1);
            let qp = QuadraturePoint::new(0, test);

            let single = Divergence::vector("velocity")
                .residual(&qp, &fields, &properties)
                .unwrap();
            let components = split().residual(&qp, &fields, &properties).unwrap();

            prop_assert_eq!(single, components);
            let expected = (a + b + c) * test;
            prop_assert!((single - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }
    }
}
