//! An explicit, in-process registry of term types.
//!
//! A [`Registry`] maps a type name to its [`Schema`] and a [`Factory`] that
//! builds an instance from a validated configuration. It is an ordinary value
//! owned by whoever composes the simulation; nothing is registered globally.
//!
//! Registration fails on duplicate names, so a misconfigured composition root
//! is reported while the registry is populated rather than when a term is
//! first used.
//!
//! # Example
//!
//! ```
//! use twine_thermoelastic::support::{
//!     profile::FunctionTable,
//!     registry::Registry,
//!     schema::{ConfigError, ParamSpec, Schema, TermParameters},
//! };
//!
//! let mut registry = Registry::<f64>::new();
//! registry
//!     .register(
//!         "Gain",
//!         Schema::new("Gain").param(ParamSpec::scalar("k", "gain")),
//!         |setup, _| Ok(Box::new(setup.scalar("k")?)),
//!     )
//!     .unwrap();
//!
//! let params = TermParameters::new().with_scalar("k", 2.5);
//! let gain = registry.create("Gain", &params, &FunctionTable::new()).unwrap();
//! assert_eq!(*gain, 2.5);
//!
//! let dup = registry.register("Gain", Schema::new("Gain"), |_, _| Ok(Box::new(0.0)));
//! assert_eq!(dup, Err(ConfigError::DuplicateRegistration("Gain".into())));
//! ```

use std::{collections::BTreeMap, fmt};

use crate::support::{
    profile::FunctionTable,
    schema::{ConfigError, Schema, TermParameters, Validated},
};

/// Builds a `T` from a configuration that passed schema validation.
pub type Factory<T> = fn(&Validated<'_>, &FunctionTable) -> Result<Box<T>, ConfigError>;

/// A registered term type.
pub struct Registration<T: ?Sized> {
    schema: Schema,
    factory: Factory<T>,
}

impl<T: ?Sized> Registration<T> {
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn factory(&self) -> Factory<T> {
        self.factory
    }
}

impl<T: ?Sized> fmt::Debug for Registration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Name-keyed registry of schemas and factories.
pub struct Registry<T: ?Sized> {
    entries: BTreeMap<String, Registration<T>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: ?Sized> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a term type under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateRegistration`] if `name` is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
        factory: Factory<T>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            log::error!("duplicate registration of term type `{name}`");
            return Err(ConfigError::DuplicateRegistration(name));
        }

        log::debug!("registered term type `{name}`");
        self.entries.insert(name, Registration { schema, factory });
        Ok(())
    }

    /// Looks up a registered term type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTerm`] if `name` is not registered.
    pub fn lookup(&self, name: &str) -> Result<&Registration<T>, ConfigError> {
        self.entries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTerm(name.to_string()))
    }

    /// Validates `params` against the schema registered under `name` and
    /// builds an instance.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the name is unknown, validation fails, or
    /// the factory rejects the configuration.
    pub fn create(
        &self,
        name: &str,
        params: &TermParameters,
        functions: &FunctionTable,
    ) -> Result<Box<T>, ConfigError> {
        let registration = self.lookup(name)?;
        let validated = registration.schema.validate(params)?;
        (registration.factory)(&validated, functions)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
