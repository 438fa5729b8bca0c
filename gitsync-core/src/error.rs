//! Error types for gitsync-core.

use thiserror::Error;

/// Errors from loading the run configuration out of the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was absent or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A variable was present but its value could not be parsed.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors from the remote provider while enumerating repositories.
///
/// Every variant is fatal to the run: with no (or only a partial) repository
/// list there is nothing meaningful to synchronize.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The credential exchange with the provider was rejected.
    #[error("provider authentication failed: {0}")]
    Auth(String),

    /// An enumeration request failed at the transport level.
    #[error("provider request failed: {0}")]
    Request(String),

    /// A response arrived but did not match the expected wire shape.
    #[error("unexpected provider response: {0}")]
    Decode(String),
}
