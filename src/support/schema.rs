//! Declarative term schemas and setup-time validation.
//!
//! A [`Schema`] states what a term type needs before it can be evaluated:
//!
//! - coupled fields, as [`Requirement`]s over field slots,
//! - material properties, as [`Requirement`]s over property names,
//! - parameters, as [`ParamSpec`]s with an optional default.
//!
//! A requirement may accept alternative forms. Validation picks the first
//! form whose names are all supplied, so a term can be configured either as
//! a single vector field or as three scalar component fields, and the
//! constructor learns which form was chosen from [`Validated`].
//!
//! Schemas are only ever extended. [`Schema::extend`] derives a new term type
//! from a base schema, and the builder methods can only add requirements,
//! so a derived term always demands at least what its base demands.
//!
//! # Example
//!
//! ```
//! use twine_thermoelastic::support::schema::{
//!     ConfigError, ParamSpec, Requirement, Schema, TermParameters,
//! };
//!
//! let schema = Schema::new("Weighted")
//!     .require_coupled(Requirement::all(&["u"]))
//!     .require_properties(Requirement::all(&["k"]))
//!     .param(ParamSpec::scalar("scale", "multiplier").with_default(1.0));
//!
//! let params = TermParameters::new().couple("u", "temperature").with_property("k");
//! let validated = schema.validate(&params).unwrap();
//! assert_eq!(validated.field("u").unwrap(), "temperature");
//! assert_eq!(validated.scalar("scale").unwrap(), 1.0);
//!
//! let missing = TermParameters::new().couple("u", "temperature");
//! assert!(matches!(
//!     schema.validate(&missing),
//!     Err(ConfigError::MissingProperty { .. })
//! ));
//! ```

mod error;
mod parameters;

use std::{collections::BTreeMap, fmt};

use nalgebra::Vector3;

pub use error::ConfigError;
pub use parameters::{ParamValue, TermParameters};

/// A set of names that must be supplied together, possibly in one of several forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    forms: Vec<Vec<&'static str>>,
}

impl Requirement {
    /// All of `names` are required.
    #[must_use]
    pub fn all(names: &[&'static str]) -> Self {
        Self {
            forms: vec![names.to_vec()],
        }
    }

    /// One of the given forms is required, preferring earlier forms.
    #[must_use]
    pub fn one_of(forms: &[&[&'static str]]) -> Self {
        Self {
            forms: forms.iter().map(|form| form.to_vec()).collect(),
        }
    }

    /// Returns the accepted forms in order of preference.
    #[must_use]
    pub fn forms(&self) -> &[Vec<&'static str>] {
        &self.forms
    }

    /// Returns true if `name` appears in any form.
    #[must_use]
    pub fn mentions(&self, name: &str) -> bool {
        self.forms.iter().flatten().any(|n| *n == name)
    }

    /// Returns true if `name` appears in the form at index `form`.
    fn form_mentions(&self, form: usize, name: &str) -> bool {
        self.forms
            .get(form)
            .is_some_and(|names| names.iter().any(|n| *n == name))
    }

    /// Selects the first form whose names all satisfy `supplied`.
    ///
    /// On failure, returns the first missing name of the preferred form.
    fn select(&self, supplied: impl Fn(&str) -> bool) -> Result<usize, &'static str> {
        if let Some(index) = self
            .forms
            .iter()
            .position(|form| form.iter().all(|name| supplied(name)))
        {
            return Ok(index);
        }

        let first_missing = self
            .forms
            .first()
            .and_then(|form| form.iter().find(|name| !supplied(name)))
            .copied()
            .unwrap_or_default();
        Err(first_missing)
    }
}

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Vector,
    Function,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Vector => "vector",
            Self::Function => "function name",
        })
    }
}

/// Declaration of one term parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: &'static str,
    kind: ParamKind,
    default: Option<ParamValue>,
    description: &'static str,
}

impl ParamSpec {
    #[must_use]
    pub fn scalar(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Scalar, description)
    }

    #[must_use]
    pub fn vector(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Vector, description)
    }

    #[must_use]
    pub fn function(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Function, description)
    }

    fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            default: None,
            description,
        }
    }

    /// Makes the parameter optional with the given default.
    ///
    /// Scalars take `f64`, vectors take `[f64; 3]` or `Vector3<f64>`, and
    /// function parameters take a function name.
    #[must_use]
    pub fn with_default(mut self, default: impl IntoDefault) -> Self {
        self.default = Some(default.into_default());
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Conversion into a parameter default.
pub trait IntoDefault {
    fn into_default(self) -> ParamValue;
}

impl IntoDefault for f64 {
    fn into_default(self) -> ParamValue {
        ParamValue::Scalar(self)
    }
}

impl IntoDefault for [f64; 3] {
    fn into_default(self) -> ParamValue {
        ParamValue::Vector(self.into())
    }
}

impl IntoDefault for Vector3<f64> {
    fn into_default(self) -> ParamValue {
        ParamValue::Vector(self)
    }
}

impl IntoDefault for &str {
    fn into_default(self) -> ParamValue {
        ParamValue::Function(self.to_string())
    }
}

/// The declared requirements of one term type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    term: &'static str,
    coupled: Vec<Requirement>,
    properties: Vec<Requirement>,
    params: Vec<ParamSpec>,
}

impl Schema {
    /// Creates an empty schema for the term type `term`.
    #[must_use]
    pub fn new(term: &'static str) -> Self {
        Self {
            term,
            coupled: Vec::new(),
            properties: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Derives a schema for `term` that keeps every requirement of `self`.
    #[must_use]
    pub fn extend(self, term: &'static str) -> Self {
        Self { term, ..self }
    }

    #[must_use]
    pub fn require_coupled(mut self, requirement: Requirement) -> Self {
        self.coupled.push(requirement);
        self
    }

    #[must_use]
    pub fn require_properties(mut self, requirement: Requirement) -> Self {
        self.properties.push(requirement);
        self
    }

    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    #[must_use]
    pub fn term(&self) -> &'static str {
        self.term
    }

    #[must_use]
    pub fn coupled(&self) -> &[Requirement] {
        &self.coupled
    }

    #[must_use]
    pub fn properties(&self) -> &[Requirement] {
        &self.properties
    }

    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Validates `params` against this schema.
    ///
    /// Checks, in order:
    ///
    /// 1. every supplied coupled slot and parameter is declared,
    /// 2. each coupled requirement has a fully bound form,
    /// 3. every bound slot belongs to a selected form,
    /// 4. each property requirement has a fully available form,
    /// 5. every parameter without a default is supplied with the declared kind.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate<'p>(&self, params: &'p TermParameters) -> Result<Validated<'p>, ConfigError> {
        let result = self.check(params);
        if let Err(err) = &result {
            log::warn!("rejected configuration: {err}");
        }
        result
    }

    fn check<'p>(&self, params: &'p TermParameters) -> Result<Validated<'p>, ConfigError> {
        let term = self.term.to_string();

        if let Some(slot) = params
            .coupled_slots()
            .find(|slot| !self.coupled.iter().any(|req| req.mentions(slot)))
        {
            return Err(ConfigError::UnknownCoupled {
                term,
                slot: slot.to_string(),
            });
        }

        if let Some((name, _)) = params
            .values()
            .find(|(name, _)| !self.params.iter().any(|spec| spec.name == *name))
        {
            return Err(ConfigError::UnknownParameter {
                term,
                name: name.to_string(),
            });
        }

        let coupled_forms = self
            .coupled
            .iter()
            .map(|req| {
                req.select(|slot| params.coupled(slot).is_some())
                    .map_err(|slot| ConfigError::MissingCoupled {
                        term: term.clone(),
                        slot: slot.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(slot) = params.coupled_slots().find(|slot| {
            !self
                .coupled
                .iter()
                .zip(&coupled_forms)
                .any(|(req, &form)| req.form_mentions(form, slot))
        }) {
            return Err(ConfigError::UnusedCoupled {
                term,
                slot: slot.to_string(),
            });
        }

        let property_forms = self
            .properties
            .iter()
            .map(|req| {
                req.select(|property| params.has_property(property))
                    .map_err(|property| ConfigError::MissingProperty {
                        term: term.clone(),
                        property: property.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = BTreeMap::new();
        for spec in &self.params {
            let value = match (params.value(spec.name), &spec.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default,
                (None, None) => {
                    return Err(ConfigError::MissingParameter {
                        term,
                        name: spec.name.to_string(),
                    });
                }
            };
            if value.kind() != spec.kind {
                return Err(ConfigError::WrongKind {
                    term,
                    name: spec.name.to_string(),
                    expected: spec.kind,
                });
            }
            values.insert(spec.name, value.clone());
        }

        Ok(Validated {
            term: self.term,
            params,
            coupled_forms,
            property_forms,
            values,
        })
    }
}

/// A configuration that passed [`Schema::validate`].
///
/// Carries the selected form of each requirement and every parameter with
/// defaults applied. Term constructors read their setup from here.
#[derive(Debug, Clone)]
pub struct Validated<'p> {
    term: &'static str,
    params: &'p TermParameters,
    coupled_forms: Vec<usize>,
    property_forms: Vec<usize>,
    values: BTreeMap<&'static str, ParamValue>,
}

impl Validated<'_> {
    #[must_use]
    pub fn term(&self) -> &'static str {
        self.term
    }

    /// Returns the selected form index of the `requirement`-th coupled requirement.
    #[must_use]
    pub fn coupled_form(&self, requirement: usize) -> Option<usize> {
        self.coupled_forms.get(requirement).copied()
    }

    /// Returns the selected form index of the `requirement`-th property requirement.
    #[must_use]
    pub fn property_form(&self, requirement: usize) -> Option<usize> {
        self.property_forms.get(requirement).copied()
    }

    /// Returns true if the caller supplied `name` rather than relying on its default.
    #[must_use]
    pub fn is_supplied(&self, name: &str) -> bool {
        self.params.value(name).is_some()
    }

    /// Returns the host variable bound to `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCoupled`] if the slot is unbound.
    pub fn field(&self, slot: &str) -> Result<&str, ConfigError> {
        self.params
            .coupled(slot)
            .ok_or_else(|| ConfigError::MissingCoupled {
                term: self.term.to_string(),
                slot: slot.to_string(),
            })
    }

    /// Returns a scalar parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the parameter is undeclared or not a scalar.
    pub fn scalar(&self, name: &str) -> Result<f64, ConfigError> {
        match self.get(name)? {
            ParamValue::Scalar(value) => Ok(*value),
            _ => Err(self.wrong_kind(name, ParamKind::Scalar)),
        }
    }

    /// Returns a vector parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the parameter is undeclared or not a vector.
    pub fn vector(&self, name: &str) -> Result<Vector3<f64>, ConfigError> {
        match self.get(name)? {
            ParamValue::Vector(value) => Ok(*value),
            _ => Err(self.wrong_kind(name, ParamKind::Vector)),
        }
    }

    /// Returns a function-name parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the parameter is undeclared or not a function name.
    pub fn function(&self, name: &str) -> Result<&str, ConfigError> {
        match self.get(name)? {
            ParamValue::Function(value) => Ok(value),
            _ => Err(self.wrong_kind(name, ParamKind::Function)),
        }
    }

    fn get(&self, name: &str) -> Result<&ParamValue, ConfigError> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::MissingParameter {
                term: self.term.to_string(),
                name: name.to_string(),
            })
    }

    fn wrong_kind(&self, name: &str, expected: ParamKind) -> ConfigError {
        ConfigError::WrongKind {
            term: self.term.to_string(),
            name: name.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divergence_like() -> Schema {
        Schema::new("Div").require_coupled(Requirement::one_of(&[
            &["v"],
            &["vx", "vy", "vz"],
        ]))
    }

    #[test]
    fn selects_first_complete_form() {
        let schema = divergence_like();

        let single = TermParameters::new().couple("v", "velocity");
        assert_eq!(schema.validate(&single).unwrap().coupled_form(0), Some(0));

        let split = TermParameters::new()
            .couple("vx", "u")
            .couple("vy", "v")
            .couple("vz", "w");
        assert_eq!(schema.validate(&split).unwrap().coupled_form(0), Some(1));
    }

    #[test]
    fn partial_forms_report_preferred_form() {
        let schema = divergence_like();
        let params = TermParameters::new().couple("vx", "u").couple("vy", "v");

        let err = schema.validate(&params).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCoupled {
                term: "Div".into(),
                slot: "v".into(),
            }
        );
    }

    #[test]
    fn rejects_undeclared_names() {
        let schema = divergence_like();

        let params = TermParameters::new()
            .couple("v", "velocity")
            .couple("w", "x");
        assert!(matches!(
            schema.validate(&params),
            Err(ConfigError::UnknownCoupled { slot, .. }) if slot == "w"
        ));

        let params = TermParameters::new()
            .couple("v", "velocity")
            .with_scalar("gain", 2.0);
        assert!(matches!(
            schema.validate(&params),
            Err(ConfigError::UnknownParameter { name, .. }) if name == "gain"
        ));
    }

    #[test]
    fn rejects_bindings_outside_selected_form() {
        let schema = divergence_like();
        let params = TermParameters::new()
            .couple("v", "velocity")
            .couple("vx", "u")
            .couple("vy", "v");

        let err = schema.validate(&params).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnusedCoupled {
                term: "Div".into(),
                slot: "vx".into(),
            }
        );
    }

    #[test]
    fn reports_supplied_parameters() {
        let schema = Schema::new("P")
            .param(ParamSpec::scalar("floor", "lower bound").with_default(1e-6))
            .param(ParamSpec::scalar("gain", "multiplier").with_default(1.0));
        let params = TermParameters::new().with_scalar("gain", 2.0);
        let validated = schema.validate(&params).unwrap();

        assert!(validated.is_supplied("gain"));
        assert!(!validated.is_supplied("floor"));
        assert_eq!(validated.scalar("floor").unwrap(), 1e-6);
    }

    #[test]
    fn applies_defaults_and_checks_kinds() {
        let schema = Schema::new("P")
            .param(
                ParamSpec::vector("alpha", "weights")
                    .with_default([1.0, 1.0, 1.0]),
            )
            .param(ParamSpec::function("func", "profile").with_default("1"))
            .param(ParamSpec::scalar("scale", "required scale"));

        let params = TermParameters::new().with_scalar("scale", 3.0);
        let validated = schema.validate(&params).unwrap();
        assert_eq!(
            validated.vector("alpha").unwrap(),
            Vector3::new(1.0, 1.0, 1.0)
        );
        assert_eq!(validated.function("func").unwrap(), "1");
        assert_eq!(validated.scalar("scale").unwrap(), 3.0);

        let missing = TermParameters::new();
        assert!(matches!(
            schema.validate(&missing),
            Err(ConfigError::MissingParameter { name, .. }) if name == "scale"
        ));

        let wrong = TermParameters::new()
            .with_scalar("scale", 1.0)
            .with_scalar("alpha", 2.0);
        assert!(matches!(
            schema.validate(&wrong),
            Err(ConfigError::WrongKind { expected: ParamKind::Vector, .. })
        ));
    }

    #[test]
    fn extension_keeps_base_requirements() {
        let base = divergence_like();
        let derived = base
            .clone()
            .extend("Weighted")
            .require_properties(Requirement::all(&["mu"]));

        assert_eq!(derived.term(), "Weighted");
        assert_eq!(derived.coupled(), base.coupled());
        assert_eq!(derived.properties().len(), 1);

        let params = TermParameters::new().couple("v", "velocity");
        assert!(base.validate(&params).is_ok());
        assert!(matches!(
            derived.validate(&params),
            Err(ConfigError::MissingProperty { property, .. }) if property == "mu"
        ));
    }

    #[test]
    fn alternative_properties_prefer_first_form() {
        let schema = Schema::new("Rho").require_properties(Requirement::one_of(&[
            &["density"],
            &["invdensity"],
        ]));

        let both = TermParameters::new()
            .with_properties(["invdensity", "density"]);
        assert_eq!(schema.validate(&both).unwrap().property_form(0), Some(0));

        let inverse = TermParameters::new().with_property("invdensity");
        assert_eq!(schema.validate(&inverse).unwrap().property_form(0), Some(1));
    }
}
