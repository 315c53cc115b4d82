//! Error types for the Helm values custom resource.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a custom resource event.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested parameter does not exist in the store
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// Reading the parameter failed for any other reason
    #[error("Failed to read parameter {name}: {reason}")]
    ConfigurationLookup { name: String, reason: String },

    /// The event carried a request type we do not handle
    #[error("Unsupported request type: {0}")]
    UnsupportedRequestType(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from reading the configuration store.
    pub fn is_configuration_lookup(&self) -> bool {
        matches!(
            self,
            Error::ParameterNotFound(_) | Error::ConfigurationLookup { .. }
        )
    }
}
