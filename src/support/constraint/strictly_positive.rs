use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Used for quantities that end up in a denominator, such as the density
/// floor of the density-weighted term.
///
/// # Examples
///
/// ```
/// use twine_thermoelastic::support::constraint::{Constrained, StrictlyPositive};
///
/// let floor = StrictlyPositive::new(1e-6).unwrap();
/// assert_eq!(floor.into_inner(), 1e-6);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        assert!(Constrained::<f64, StrictlyPositive>::new(1.0).is_ok());
        assert!(StrictlyPositive::new(f64::MIN_POSITIVE).is_ok());
        assert_eq!(
            StrictlyPositive::new(0.0).unwrap_err(),
            ConstraintError::Zero
        );
        assert_eq!(
            StrictlyPositive::new(-5.0).unwrap_err(),
            ConstraintError::Negative
        );
        assert_eq!(
            StrictlyPositive::new(f64::NAN).unwrap_err(),
            ConstraintError::NotANumber
        );
    }
}
