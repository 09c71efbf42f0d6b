//! [`twine_core::Model`] adapters.

use std::convert::Infallible;

use twine_core::Model;

use crate::support::quadrature::{CoupledFields, MaterialProperties, QuadraturePoint};

use super::{
    material::{BioMaterial, BioProperties},
    terms::{EvaluationError, Term},
};

/// Evaluates the material at a quadrature index.
impl Model for BioMaterial {
    type Input = usize;
    type Output = BioProperties;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.compute(*input))
    }
}

/// A term bound to the providers of one evaluation pass.
///
/// Calling the model with a [`QuadraturePoint`] returns that point's residual
/// contribution.
pub struct BoundTerm<'a> {
    term: &'a dyn Term,
    fields: &'a dyn CoupledFields,
    properties: &'a dyn MaterialProperties,
}

impl<'a> BoundTerm<'a> {
    #[must_use]
    pub fn new(
        term: &'a dyn Term,
        fields: &'a dyn CoupledFields,
        properties: &'a dyn MaterialProperties,
    ) -> Self {
        Self {
            term,
            fields,
            properties,
        }
    }
}

impl Model for BoundTerm<'_> {
    type Input = QuadraturePoint;
    type Output = f64;
    type Error = EvaluationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.term.residual(input, self.fields, self.properties)
    }
}
