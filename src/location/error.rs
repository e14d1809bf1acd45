//! Error types for location tracking.
//!
//! Authorization and query failures are always returned to the caller;
//! there is no fallback sample.

use thiserror::Error;

/// Error type for location tracker operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// `start` was called with no authorization mode while the provider
    /// has not asked the user yet.
    #[error("Authorization mode not set")]
    AuthorizationModeNotSet,

    /// The provider reports denied or restricted access.
    #[error("Location authorization denied")]
    AuthorizationDenied,

    /// No sample has been ingested yet.
    #[error("No locations available")]
    LocationsEmpty,

    /// History capacity must be at least 1.
    #[error("Invalid history capacity: {0}")]
    InvalidCapacity(usize),

    /// The provider failed to issue a request or enable updates.
    #[error("Location provider error: {0}")]
    Provider(String),

    /// Configuration could not be parsed or serialized.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for location operations.
pub type Result<T> = std::result::Result<T, LocationError>;

impl From<serde_json::Error> for LocationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
