//! Weak-form residual terms.
//!
//! Each term maps field gradients, material properties, and a test-function
//! value at one quadrature point to a scalar residual contribution:
//!
//! | name         | type                | contribution                                   |
//! |--------------|---------------------|------------------------------------------------|
//! | `ModDiv`     | [`Divergence`]      | `(∂₀v₀ + ∂₁v₁ + ∂₂v₂)·ψ`                       |
//! | `LambdaTerm` | [`LameWeighted`]    | `−λ·(∂₀vx + ∂₁vy + ∂₂vz)·ψ`                    |
//! | `MuTerm`     | [`LameWeighted`]    | `−μ·(a₀∂₀vx + a₁∂₁vy + a₂∂₂vz)·ψ`              |
//! | `RhoTerm`    | [`DensityWeighted`] | `−ρ⁻¹·(∂₀σx + ∂₁σy + ∂₂σz)·ψ`                  |
//! | `SAR`        | [`Sar`]             | `α·(3λ + 2μ)·f(t, x)·ψ`                        |
//!
//! Terms are immutable after construction and hold only bound field names
//! and configuration, so a single instance can be evaluated from any number
//! of threads at once.
//!
//! Hosts normally build terms through [`builtin_registry`], which validates
//! a [`TermParameters`](crate::support::schema::TermParameters) against the
//! term's [`Schema`] before construction.

mod density;
mod divergence;
mod lame;
mod sar;

use std::fmt;

use thiserror::Error;

use crate::support::{
    quadrature::{CoupledFields, LookupError, MaterialProperties, QuadraturePoint},
    registry::Registry,
    schema::{ConfigError, Schema},
};

pub use density::{DENSITY_FLOOR, DensityWeighted, InverseDensity, floored_inverse};
pub use divergence::{ComponentFields, Divergence, DivergenceForm};
pub use lame::{LameCoefficient, LameWeighted};
pub use sar::{HeatSource, Sar};

/// A registry of residual terms.
pub type TermRegistry = Registry<dyn Term>;

/// A residual term evaluated one quadrature point at a time.
pub trait Term: fmt::Debug + Send + Sync {
    /// The registered type name of this term.
    fn name(&self) -> &'static str;

    /// The schema this term was validated against.
    fn schema(&self) -> Schema;

    /// Computes the residual contribution at `qp`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] if a provider cannot supply a bound field
    /// or property. The host should treat the whole pass as failed.
    fn residual(
        &self,
        qp: &QuadraturePoint,
        fields: &dyn CoupledFields,
        properties: &dyn MaterialProperties,
    ) -> Result<f64, EvaluationError>;
}

/// Errors raised while evaluating a term at a quadrature point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// A field or property lookup failed.
    #[error("{term} failed at quadrature point {qp}")]
    Lookup {
        term: &'static str,
        qp: usize,
        #[source]
        source: LookupError,
    },
}

impl EvaluationError {
    pub(crate) fn lookup(term: &'static str, qp: usize) -> impl Fn(LookupError) -> Self {
        move |source| Self::Lookup { term, qp, source }
    }
}

/// Returns a registry holding every built-in term type.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateRegistration`] only if the built-in names
/// collide, which would be a programming error in this crate.
pub fn builtin_registry() -> Result<TermRegistry, ConfigError> {
    let mut registry = TermRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}

/// Adds every built-in term type to an existing registry.
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateRegistration`] if any built-in name is
/// already registered.
pub fn register_builtins(registry: &mut TermRegistry) -> Result<(), ConfigError> {
    registry.register(
        Divergence::NAME,
        Divergence::schema(),
        Divergence::build,
    )?;
    registry.register(
        LameWeighted::LAMBDA_NAME,
        LameWeighted::lambda_schema(),
        LameWeighted::build_lambda,
    )?;
    registry.register(
        LameWeighted::MU_NAME,
        LameWeighted::mu_schema(),
        LameWeighted::build_mu,
    )?;
    registry.register(
        DensityWeighted::NAME,
        DensityWeighted::schema(),
        DensityWeighted::build,
    )?;
    registry.register(Sar::NAME, Sar::schema(), Sar::build)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::thermoelastic::material::PropertyTable;
    use crate::models::thermoelastic::test_support::GradientTable;
    use crate::support::{profile::FunctionTable, schema::TermParameters};

    #[test]
    fn builtins_are_registered_once() {
        let mut registry = builtin_registry().unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["LambdaTerm", "ModDiv", "MuTerm", "RhoTerm", "SAR"]
        );

        let err = register_builtins(&mut registry).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRegistration("ModDiv".into()));
    }

    #[test]
    fn instances_report_their_registered_schema() {
        let registry = builtin_registry().unwrap();
        let functions = FunctionTable::new();

        let components = TermParameters::new()
            .couple("vx", "u")
            .couple("vy", "v")
            .couple("vz", "w");
        let elastic = components.clone().with_properties(["mu", "lambda"]);
        let stress = TermParameters::new()
            .couple("sigix", "sx")
            .couple("sigiy", "sy")
            .couple("sigiz", "sz")
            .with_property("density");
        let sar = TermParameters::new()
            .with_properties(["mu", "lambda", "alpha"]);

        for (name, params) in [
            ("ModDiv", &components),
            ("LambdaTerm", &elastic),
            ("MuTerm", &elastic),
            ("RhoTerm", &stress),
            ("SAR", &sar),
        ] {
            let term = registry.create(name, params, &functions).unwrap();
            assert_eq!(term.name(), name);
            assert_eq!(&term.schema(), registry.lookup(name).unwrap().schema());
        }
    }

    #[test]
    fn lookup_failures_carry_term_and_point() {
        let term = Divergence::vector("velocity");
        let qp = QuadraturePoint::new(5, 1.0);

        let err = term
            .residual(&qp, &GradientTable::new(1), &PropertyTable::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            EvaluationError::Lookup {
                term: "ModDiv",
                qp: 5,
                source: LookupError::UnknownField {
                    name: "velocity".into()
                },
            }
        );
        assert_eq!(err.to_string(), "ModDiv failed at quadrature point 5");
    }
}
