//! Named space-time profile functions.
//!
//! A profile is a stateless scalar function `f(t, x)` that a term multiplies
//! into its residual (for example the spatial shape of an absorbed power
//! density). Terms refer to profiles by name. The host registers its
//! functions in a [`FunctionTable`], and names that parse as numbers resolve
//! to [`Constant`] profiles without registration, so `"1"` always means the
//! unit function.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use twine_thermoelastic::support::profile::{FunctionTable, ProfileFunction};
//!
//! let mut functions = FunctionTable::new();
//! functions.insert("pulse", |t: f64, _x: &Point3<f64>| if t < 1.0 { 2.0 } else { 0.0 });
//!
//! let pulse = functions.resolve("pulse").unwrap();
//! assert_eq!(pulse.value(0.5, &Point3::origin()), 2.0);
//!
//! let unit = functions.resolve("1").unwrap();
//! assert_eq!(unit.value(10.0, &Point3::new(1.0, 2.0, 3.0)), 1.0);
//! ```

use std::{collections::BTreeMap, fmt, sync::Arc};

use nalgebra::Point3;

/// A scalar function of time and position.
///
/// Implementations must be stateless: the same arguments always produce the
/// same value, and evaluation may happen concurrently from many threads.
pub trait ProfileFunction: Send + Sync {
    /// Evaluates the profile at time `time` and position `point`.
    fn value(&self, time: f64, point: &Point3<f64>) -> f64;
}

impl<F> ProfileFunction for F
where
    F: Fn(f64, &Point3<f64>) -> f64 + Send + Sync,
{
    fn value(&self, time: f64, point: &Point3<f64>) -> f64 {
        self(time, point)
    }
}

/// A profile that is the same everywhere and at all times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl ProfileFunction for Constant {
    fn value(&self, _time: f64, _point: &Point3<f64>) -> f64 {
        self.0
    }
}

/// Host-supplied profile functions, keyed by name.
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: BTreeMap<String, Arc<dyn ProfileFunction>>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named profile function.
    pub fn insert(&mut self, name: impl Into<String>, function: impl ProfileFunction + 'static) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Resolves a profile by name.
    ///
    /// Registered names take precedence. Otherwise a name that parses as a
    /// finite number yields a [`Constant`] profile. Returns `None` for any
    /// other name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn ProfileFunction>> {
        if let Some(function) = self.functions.get(name) {
            return Some(Arc::clone(function));
        }

        name.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| Arc::new(Constant(value)) as Arc<dyn ProfileFunction>)
    }

    /// Returns true if no functions have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_names_are_constants() {
        let functions = FunctionTable::new();
        let x = Point3::new(0.5, -1.0, 2.0);

        let one = functions.resolve("1").expect("`1` is a constant");
        assert_eq!(one.value(0.0, &x), 1.0);

        let half = functions.resolve(" 0.5 ").expect("`0.5` is a constant");
        assert_eq!(half.value(3.0, &x), 0.5);

        assert!(functions.resolve("inf").is_none());
        assert!(functions.resolve("NaN").is_none());
        assert!(functions.resolve("missing").is_none());
    }

    #[test]
    fn registered_functions_see_time_and_position() {
        let mut functions = FunctionTable::new();
        functions.insert("ramp", |t: f64, x: &Point3<f64>| t * x.x);
        assert!(!functions.is_empty());

        let ramp = functions.resolve("ramp").unwrap();
        assert_eq!(ramp.value(2.0, &Point3::new(3.0, 0.0, 0.0)), 6.0);
    }

    #[test]
    fn registered_names_shadow_numeric_parsing() {
        let mut functions = FunctionTable::new();
        functions.insert("1", Constant(4.0));

        let f = functions.resolve("1").unwrap();
        assert_eq!(f.value(0.0, &Point3::origin()), 4.0);
    }
}
