use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Vector3;

use super::ParamKind;

/// A configuration value supplied to a term.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Vector3<f64>),
    /// Name of a profile function, resolved at construction.
    Function(String),
}

impl ParamValue {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Scalar(_) => ParamKind::Scalar,
            Self::Vector(_) => ParamKind::Vector,
            Self::Function(_) => ParamKind::Function,
        }
    }
}

/// Everything a host supplies when it instantiates one term.
///
/// - Coupled bindings map a term's field slot (such as `vx`) to the name of a
///   host variable (such as `velocity_x`).
/// - Properties list the material properties declared in the term's region.
/// - Values hold scalar, vector, and function-name parameters.
///
/// # Example
///
/// ```
/// use twine_thermoelastic::support::schema::TermParameters;
///
/// let params = TermParameters::new()
///     .couple("vx", "velocity_x")
///     .couple("vy", "velocity_y")
///     .couple("vz", "velocity_z")
///     .with_properties(["mu", "lambda"])
///     .with_vector("alpha", [2.0, 1.0, 1.0]);
///
/// assert_eq!(params.coupled("vx"), Some("velocity_x"));
/// assert!(params.has_property("lambda"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermParameters {
    coupled: BTreeMap<String, String>,
    properties: BTreeSet<String>,
    values: BTreeMap<String, ParamValue>,
}

impl TermParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the term's field slot `slot` to the host variable `variable`.
    #[must_use]
    pub fn couple(mut self, slot: impl Into<String>, variable: impl Into<String>) -> Self {
        self.coupled.insert(slot.into(), variable.into());
        self
    }

    /// Declares a material property as available to the term.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.insert(property.into());
        self
    }

    /// Declares several material properties as available to the term.
    #[must_use]
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_scalar(self, name: impl Into<String>, value: f64) -> Self {
        self.with_value(name, ParamValue::Scalar(value))
    }

    #[must_use]
    pub fn with_vector(self, name: impl Into<String>, value: impl Into<Vector3<f64>>) -> Self {
        self.with_value(name, ParamValue::Vector(value.into()))
    }

    #[must_use]
    pub fn with_function(self, name: impl Into<String>, function: impl Into<String>) -> Self {
        self.with_value(name, ParamValue::Function(function.into()))
    }

    /// Sets a parameter value, replacing any previous value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns the host variable bound to `slot`, if any.
    #[must_use]
    pub fn coupled(&self, slot: &str) -> Option<&str> {
        self.coupled.get(slot).map(String::as_str)
    }

    /// Iterates over the bound slots in name order.
    pub fn coupled_slots(&self) -> impl Iterator<Item = &str> {
        self.coupled.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Iterates over the supplied parameters in name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}
