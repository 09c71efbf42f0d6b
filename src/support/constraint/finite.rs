use num_traits::Float;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a floating-point value is finite.
///
/// Lamé's first parameter and the thermal-expansion coefficient may take
/// either sign, so the only requirement placed on them is that they are
/// ordinary numbers.
///
/// # Examples
///
/// ```
/// use twine_thermoelastic::support::constraint::Finite;
///
/// assert_eq!(Finite::new(-0.5).unwrap().into_inner(), -0.5);
/// assert!(Finite::new(f64::INFINITY).is_err());
/// assert!(Finite::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

impl Finite {
    /// Constructs a [`Constrained<T, Finite>`] if the value is finite.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is infinite or not a number (`NaN`).
    pub fn new<T: Float>(value: T) -> Result<Constrained<T, Finite>, ConstraintError> {
        Constrained::<T, Finite>::new(value)
    }
}

impl<T: Float> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        assert!(Finite::new(0.0).is_ok());
        assert!(Finite::new(-3.0e9).is_ok());
        assert!(Finite::new(f32::MAX).is_ok());
        assert_eq!(Finite::new(f64::NAN), Err(ConstraintError::NotANumber));
        assert_eq!(
            Finite::new(f64::NEG_INFINITY),
            Err(ConstraintError::Infinite)
        );
    }
}
