use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::ParamKind;

/// Errors raised while validating term configuration or populating a registry.
///
/// Every variant is a setup-time failure. None of them can occur once a term
/// has been constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No accepted form of a coupled-field requirement is fully bound.
    #[error("{term}: missing coupled field `{slot}`")]
    MissingCoupled { term: String, slot: String },

    /// A coupled-field binding names a slot the term does not declare.
    #[error("{term}: unknown coupled field `{slot}`")]
    UnknownCoupled { term: String, slot: String },

    /// A coupled-field binding is declared but not part of the selected form.
    #[error("{term}: coupled field `{slot}` is not used by the selected form")]
    UnusedCoupled { term: String, slot: String },

    /// No accepted form of a material-property requirement is available.
    #[error("{term}: missing material property `{property}`")]
    MissingProperty { term: String, property: String },

    /// A required parameter (one without a default) was not supplied.
    #[error("{term}: missing parameter `{name}`")]
    MissingParameter { term: String, name: String },

    /// A supplied parameter is not declared by the term.
    #[error("{term}: unknown parameter `{name}`")]
    UnknownParameter { term: String, name: String },

    /// A supplied parameter has no effect in the selected form.
    #[error("{term}: parameter `{name}` is not used by the selected form")]
    UnusedParameter { term: String, name: String },

    /// A supplied parameter has a different kind than declared.
    #[error("{term}: parameter `{name}` must be a {expected}")]
    WrongKind {
        term: String,
        name: String,
        expected: ParamKind,
    },

    /// A supplied parameter value violates a numeric constraint.
    #[error("{term}: invalid value for parameter `{name}`")]
    InvalidParameter {
        term: String,
        name: String,
        #[source]
        source: ConstraintError,
    },

    /// A profile function name could not be resolved.
    #[error("{term}: unknown function `{function}` for parameter `{name}`")]
    UnknownFunction {
        term: String,
        name: String,
        function: String,
    },

    /// A term type was registered twice.
    #[error("term type `{0}` is already registered")]
    DuplicateRegistration(String),

    /// A term type was requested that was never registered.
    #[error("term type `{0}` is not registered")]
    UnknownTerm(String),
}
