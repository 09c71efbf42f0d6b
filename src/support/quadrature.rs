//! Quadrature-point data and the provider interfaces a host engine implements.
//!
//! Residual terms never own field or property storage. At each quadrature
//! point the host hands a term a [`QuadraturePoint`] together with read-only
//! access to a [`CoupledFields`] provider and a [`MaterialProperties`]
//! provider, and collects the scalar contribution the term returns.
//!
//! Both provider traits require [`Sync`] so a host may evaluate many
//! quadrature points concurrently against the same providers.

use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Spatial gradient of a scalar field, one component per coordinate axis.
pub type Gradient = Vector3<f64>;

/// A single quadrature point as seen by a residual term.
///
/// The host owns the quadrature loop. This value carries the point's index
/// (used to address field and property storage), the test-function value for
/// the current local trial-function index, and the space-time coordinates
/// needed by profile functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    pub index: usize,
    pub test: f64,
    pub time: f64,
    pub point: Point3<f64>,
}

impl QuadraturePoint {
    /// Creates a quadrature point at the origin and time zero.
    #[must_use]
    pub fn new(index: usize, test: f64) -> Self {
        Self {
            index,
            test,
            time: 0.0,
            point: Point3::origin(),
        }
    }

    /// Returns a copy with the given time, keeping other fields unchanged.
    #[must_use]
    pub fn with_time(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Returns a copy with the given spatial point, keeping other fields unchanged.
    #[must_use]
    pub fn with_point(self, point: Point3<f64>) -> Self {
        Self { point, ..self }
    }
}

/// Errors raised by a provider when a lookup cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The field was not coupled to the requesting term.
    #[error("unknown coupled field `{name}`")]
    UnknownField { name: String },

    /// No material in scope declares the property.
    #[error("unknown material property `{name}`")]
    UnknownProperty { name: String },

    /// The provider holds no data for the quadrature point.
    #[error("quadrature point {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Read access to coupled field gradients.
pub trait CoupledFields: Sync {
    /// Returns the gradient of `name` at quadrature point `qp`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the field is unknown or `qp` is out of range.
    fn gradient(&self, name: &str, qp: usize) -> Result<Gradient, LookupError>;
}

/// Read access to scalar material properties.
pub trait MaterialProperties: Sync {
    /// Returns the value of `name` at quadrature point `qp`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the property is undeclared or `qp` is out of range.
    fn value(&self, name: &str, qp: usize) -> Result<f64, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_index_and_test() {
        let qp = QuadraturePoint::new(3, 0.25)
            .with_time(1.5)
            .with_point(Point3::new(1.0, 2.0, 3.0));

        assert_eq!(qp.index, 3);
        assert_eq!(qp.test, 0.25);
        assert_eq!(qp.time, 1.5);
        assert_eq!(qp.point, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn lookup_errors_name_the_missing_entry() {
        let err = LookupError::UnknownField {
            name: "vx".to_string(),
        };
        assert_eq!(err.to_string(), "unknown coupled field `vx`");

        let err = LookupError::OutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "quadrature point 4 out of range (len 2)");
    }
}
