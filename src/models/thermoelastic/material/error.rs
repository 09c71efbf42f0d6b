use thiserror::Error;
use uom::si::f64::{MassDensity, Pressure, TemperatureCoefficient};

use crate::support::constraint::ConstraintError;

/// Errors raised when a [`BioMaterial`](super::BioMaterial) is built from invalid constants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BioMaterialError {
    #[error("invalid density: {density:?}")]
    Density {
        density: MassDensity,
        #[source]
        source: ConstraintError,
    },
    #[error("invalid shear modulus: {mu:?}")]
    ShearModulus {
        mu: Pressure,
        #[source]
        source: ConstraintError,
    },
    #[error("invalid Lamé lambda: {lambda:?}")]
    Lambda {
        lambda: Pressure,
        #[source]
        source: ConstraintError,
    },
    #[error("invalid thermal expansion coefficient: {alpha:?}")]
    Expansion {
        alpha: TemperatureCoefficient,
        #[source]
        source: ConstraintError,
    },
}

/// A [`PropertyTable`](super::PropertyTable) column whose length does not match the table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("property `{name}` has {actual} values for {expected} quadrature points")]
pub struct ColumnLengthError {
    pub name: String,
    pub expected: usize,
    pub actual: usize,
}
