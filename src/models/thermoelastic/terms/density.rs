use crate::models::thermoelastic::material::{DENSITY, INVERSE_DENSITY};
use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    profile::FunctionTable,
    quadrature::{CoupledFields, MaterialProperties, QuadraturePoint},
    schema::{ConfigError, ParamSpec, Requirement, Schema, Validated},
};

use super::{ComponentFields, EvaluationError, Term};

/// Smallest density used when inverting a `density` property.
pub const DENSITY_FLOOR: f64 = 1e-6;

/// Returns `1 / max(density, floor)`.
///
/// A zero or near-zero density yields `1 / floor` instead of infinity. A
/// `NaN` density is not clamped and yields `NaN`.
#[inline]
#[must_use]
pub fn floored_inverse(density: f64, floor: f64) -> f64 {
    if density < floor {
        log::trace!("density {density} floored to {floor}");
        floor.recip()
    } else {
        density.recip()
    }
}

/// Where the inverse density comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InverseDensity {
    /// Invert the `density` property, flooring it first.
    Floored { floor: f64 },
    /// Read a precomputed `invdensity` property as is.
    Direct,
}

/// Divergence of a stress-rate field scaled by the inverse density.
///
/// `−ρ⁻¹·(∂₀σx + ∂₁σy + ∂₂σz)·ψ`
///
/// The variant follows the declared material properties: `density` selects
/// the floored inverse and takes precedence, `invdensity` alone selects the
/// direct form.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityWeighted {
    inverse: InverseDensity,
    components: ComponentFields,
}

impl DensityWeighted {
    pub const NAME: &'static str = "RhoTerm";

    pub const COMPONENT_SLOTS: [&'static str; 3] = ["sigix", "sigiy", "sigiz"];

    /// Density floor parameter of the floored form.
    pub const FLOOR: &'static str = "density_floor";

    /// A term that floors and inverts `density` with [`DENSITY_FLOOR`].
    #[must_use]
    pub fn floored(components: ComponentFields) -> Self {
        Self {
            inverse: InverseDensity::Floored {
                floor: DENSITY_FLOOR,
            },
            components,
        }
    }

    /// A term that reads `invdensity` directly.
    #[must_use]
    pub fn direct(components: ComponentFields) -> Self {
        Self {
            inverse: InverseDensity::Direct,
            components,
        }
    }

    /// Replaces the density floor of a floored term.
    ///
    /// Has no effect on a direct term.
    #[must_use]
    pub fn with_floor(mut self, floor: Constrained<f64, StrictlyPositive>) -> Self {
        if let InverseDensity::Floored { .. } = self.inverse {
            self.inverse = InverseDensity::Floored {
                floor: floor.into_inner(),
            };
        }
        self
    }

    #[must_use]
    pub fn inverse(&self) -> InverseDensity {
        self.inverse
    }

    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(Self::NAME)
            .require_coupled(Requirement::all(&Self::COMPONENT_SLOTS))
            .require_properties(Requirement::one_of(&[&[DENSITY], &[INVERSE_DENSITY]]))
            .param(
                ParamSpec::scalar(Self::FLOOR, "smallest density used when inverting")
                    .with_default(DENSITY_FLOOR),
            )
    }

    pub(super) fn build(
        setup: &Validated<'_>,
        _functions: &FunctionTable,
    ) -> Result<Box<dyn Term>, ConfigError> {
        let components = ComponentFields::bind(setup, Self::COMPONENT_SLOTS)?;

        let term = match setup.property_form(0) {
            Some(0) => {
                let floor = setup.scalar(Self::FLOOR)?;
                let floor = StrictlyPositive::new(floor).map_err(Self::invalid_floor)?;
                Self::floored(components).with_floor(floor)
            }
            _ if setup.is_supplied(Self::FLOOR) => {
                return Err(ConfigError::UnusedParameter {
                    term: Self::NAME.to_string(),
                    name: Self::FLOOR.to_string(),
                });
            }
            _ => Self::direct(components),
        };
        Ok(Box::new(term))
    }

    fn invalid_floor(source: ConstraintError) -> ConfigError {
        ConfigError::InvalidParameter {
            term: Self::NAME.to_string(),
            name: Self::FLOOR.to_string(),
            source,
        }
    }
}

impl Term for DensityWeighted {
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
        properties: &dyn MaterialProperties,
    ) -> Result<f64, EvaluationError> {
        let on_err = EvaluationError::lookup(Self::NAME, qp.index);
        let d = self.components.diagonal(fields, qp.index).map_err(&on_err)?;

        let inverse = match self.inverse {
            InverseDensity::Floored { floor } => floored_inverse(
                properties.value(DENSITY, qp.index).map_err(&on_err)?,
                floor,
            ),
            InverseDensity::Direct => properties
                .value(INVERSE_DENSITY, qp.index)
                .map_err(&on_err)?,
        };

        Ok(-inverse * (d[0] + d[1] + d[2]) * qp.test)
    }
}
