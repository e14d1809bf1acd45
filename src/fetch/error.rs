//! Error types for typed fetches.

use thiserror::Error;

/// Error type for [`JsonFetcher`](super::JsonFetcher) requests.
///
/// Every failed fetch maps to exactly one of these kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be made or the server did not answer successfully.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with an empty body.
    #[error("No data in response")]
    DataNotFound,

    /// The body is not valid JSON for the requested type.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn data_not_found_display() {
        assert_eq!(FetchError::DataNotFound.to_string(), "No data in response");
    }

    #[test]
    fn decode_error_display() {
        let err = FetchError::Decode("expected value".to_string());
        assert_eq!(err.to_string(), "Failed to decode response: expected value");
    }
}
