use nalgebra::Vector3;

use crate::models::thermoelastic::material::{LAMBDA, MU};
use crate::support::{
    profile::FunctionTable,
    quadrature::{CoupledFields, MaterialProperties, QuadraturePoint},
    schema::{ConfigError, ParamSpec, Requirement, Schema, Validated},
};

use super::{ComponentFields, Divergence, EvaluationError, Term};

/// Which Lamé parameter scales the divergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LameCoefficient {
    /// `−λ·(∂₀vx + ∂₁vy + ∂₂vz)·ψ`
    Lambda,
    /// `−μ·(a₀∂₀vx + a₁∂₁vy + a₂∂₂vz)·ψ`
    Mu { weights: Vector3<f64> },
}

/// Divergence of a three-component field scaled by a Lamé parameter.
///
/// Both variants require `mu` and `lambda` to be declared even though each
/// reads only one of them, so the two terms share one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LameWeighted {
    coefficient: LameCoefficient,
    components: ComponentFields,
}

impl LameWeighted {
    pub const LAMBDA_NAME: &'static str = "LambdaTerm";
    pub const MU_NAME: &'static str = "MuTerm";

    /// Per-axis weights of the μ term.
    pub const WEIGHTS: &'static str = "alpha";

    #[must_use]
    pub fn lambda(components: ComponentFields) -> Self {
        Self {
            coefficient: LameCoefficient::Lambda,
            components,
        }
    }

    /// A μ term with the given per-axis weights.
    ///
    /// Unit weights give the unweighted divergence.
    #[must_use]
    pub fn mu(components: ComponentFields, weights: impl Into<Vector3<f64>>) -> Self {
        Self {
            coefficient: LameCoefficient::Mu {
                weights: weights.into(),
            },
            components,
        }
    }

    #[must_use]
    pub fn coefficient(&self) -> LameCoefficient {
        self.coefficient
    }

    #[must_use]
    pub fn lambda_schema() -> Schema {
        Divergence::component_schema()
            .extend(Self::LAMBDA_NAME)
            .require_properties(Requirement::all(&[MU, LAMBDA]))
    }

    #[must_use]
    pub fn mu_schema() -> Schema {
        Divergence::component_schema()
            .extend(Self::MU_NAME)
            .require_properties(Requirement::all(&[MU, LAMBDA]))
            .param(
                ParamSpec::vector(Self::WEIGHTS, "per-axis weights of the divergence")
                    .with_default([1.0, 1.0, 1.0]),
            )
    }

    pub(super) fn build_lambda(
        setup: &Validated<'_>,
        _functions: &FunctionTable,
    ) -> Result<Box<dyn Term>, ConfigError> {
        let components = ComponentFields::bind(setup, Divergence::COMPONENT_SLOTS)?;
        Ok(Box::new(Self::lambda(components)))
    }

    pub(super) fn build_mu(
        setup: &Validated<'_>,
        _functions: &FunctionTable,
    ) -> Result<Box<dyn Term>, ConfigError> {
        let components = ComponentFields::bind(setup, Divergence::COMPONENT_SLOTS)?;
        Ok(Box::new(Self::mu(components, setup.vector(Self::WEIGHTS)?)))
    }
}

impl Term for LameWeighted {
    fn name(&self) -> &'static str {
        match self.coefficient {
            LameCoefficient::Lambda => Self::LAMBDA_NAME,
            LameCoefficient::Mu { .. } => Self::MU_NAME,
        }
    }

    fn schema(&self) -> Schema {
        match self.coefficient {
            LameCoefficient::Lambda => Self::lambda_schema(),
            LameCoefficient::Mu { .. } => Self::mu_schema(),
        }
    }

    fn residual(
        &self,
        qp: &QuadraturePoint,
        fields: &dyn CoupledFields,
        properties: &dyn MaterialProperties,
    ) -> Result<f64, EvaluationError> {
        let on_err = EvaluationError::lookup(self.name(), qp.index);
        let d = self.components.diagonal(fields, qp.index).map_err(&on_err)?;

        let (modulus, divergence) = match self.coefficient {
            LameCoefficient::Lambda => (
                properties.value(LAMBDA, qp.index).map_err(&on_err)?,
                d[0] + d[1] + d[2],
            ),
            LameCoefficient::Mu { weights: a } => (
                properties.value(MU, qp.index).map_err(&on_err)?,
                a[0] * d[0] + a[1] * d[1] + a[2] * d[2],
            ),
        };

        Ok(-modulus * divergence * qp.test)
    }
}
