// Error handling for the listener registry and its configuration

use thiserror::Error;

/// Caller-contract violations reported by the listener registry.
///
/// Operations on an unknown listener name are not errors; they return
/// `false` or `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{category} listener name cannot be empty")]
    EmptyListenerName { category: &'static str },

    #[error("Matcher list for listener '{listener}' cannot be empty")]
    EmptyMatcherList { listener: String },

    #[error("Cannot remove the last matcher of listener '{listener}'")]
    LastMatcher { listener: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },
}
