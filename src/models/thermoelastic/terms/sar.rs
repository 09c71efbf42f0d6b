use std::{fmt, sync::Arc};

use crate::models::thermoelastic::material::{
    ALPHA, HEAT_SOURCE, LAMBDA, MU, heat_source_coefficient,
};
use crate::support::{
    profile::{Constant, FunctionTable, ProfileFunction},
    quadrature::{CoupledFields, MaterialProperties, QuadraturePoint},
    schema::{ConfigError, ParamSpec, Requirement, Schema, Validated},
};

use super::{EvaluationError, Term};

/// Where the heat-source coefficient `α·(3λ + 2μ)` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatSource {
    /// Recompute from `alpha`, `lambda`, and `mu`.
    Recompute,
    /// Read the material's published `Qs`.
    Published,
}

/// Specific-absorption-rate source term.
///
/// `α·(3λ + 2μ)·f(t, x)·ψ`, where `f` is a named profile function. Both
/// coefficient sources go through
/// [`heat_source_coefficient`], so switching between them never changes the
/// result.
#[derive(Clone)]
pub struct Sar {
    source: HeatSource,
    profile_name: String,
    profile: Arc<dyn ProfileFunction>,
}

impl Sar {
    pub const NAME: &'static str = "SAR";

    /// Profile function parameter.
    pub const FUNCTION: &'static str = "func";

    /// Creates a term with the unit profile.
    #[must_use]
    pub fn new(source: HeatSource) -> Self {
        Self {
            source,
            profile_name: "1".to_string(),
            profile: Arc::new(Constant(1.0)),
        }
    }

    /// Replaces the profile function.
    #[must_use]
    pub fn with_profile(
        mut self,
        name: impl Into<String>,
        profile: Arc<dyn ProfileFunction>,
    ) -> Self {
        self.profile_name = name.into();
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn source(&self) -> HeatSource {
        self.source
    }

    #[must_use]
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Prefers recomputing from the elastic constants when they are
    /// declared, otherwise reads `Qs`.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(Self::NAME)
            .require_properties(Requirement::one_of(&[&[MU, LAMBDA, ALPHA], &[HEAT_SOURCE]]))
            .param(
                ParamSpec::function(Self::FUNCTION, "SAR function profile")
                    .with_default("1"),
            )
    }

    pub(super) fn build(
        setup: &Validated<'_>,
        functions: &FunctionTable,
    ) -> Result<Box<dyn Term>, ConfigError> {
        let source = match setup.property_form(0) {
            Some(0) => HeatSource::Recompute,
            _ => HeatSource::Published,
        };

        let name = setup.function(Self::FUNCTION)?;
        let profile = functions
            .resolve(name)
            .ok_or_else(|| ConfigError::UnknownFunction {
                term: Self::NAME.to_string(),
                name: Self::FUNCTION.to_string(),
                function: name.to_string(),
            })?;

        Ok(Box::new(Self::new(source).with_profile(name, profile)))
    }

    fn coefficient(
        &self,
        properties: &dyn MaterialProperties,
        qp: usize,
    ) -> Result<f64, EvaluationError> {
        let on_err = EvaluationError::lookup(Self::NAME, qp);
        match self.source {
            HeatSource::Recompute => Ok(heat_source_coefficient(
                properties.value(ALPHA, qp).map_err(&on_err)?,
                properties.value(LAMBDA, qp).map_err(&on_err)?,
                properties.value(MU, qp).map_err(&on_err)?,
            )),
            HeatSource::Published => properties.value(HEAT_SOURCE, qp).map_err(&on_err),
        }
    }
}

impl fmt::Debug for Sar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sar")
            .field("source", &self.source)
            .field("profile", &self.profile_name)
            .finish()
    }
}

impl Term for Sar {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schema(&self) -> Schema {
        Self::schema()
    }

    fn residual(
        &self,
        qp: &QuadraturePoint,
        _fields: &dyn CoupledFields,
        properties: &dyn MaterialProperties,
    ) -> Result<f64, EvaluationError> {
        let coefficient = self.coefficient(properties, qp.index)?;
        let profile = self.profile.value(qp.time, &qp.point);
        Ok(coefficient * profile * qp.test)
    }
}
