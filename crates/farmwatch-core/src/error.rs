//! Error types for farmwatch-core.
//!
//! Every error here is terminal at the point where it occurs: the poller logs
//! it and waits for the next scheduled tick. Nothing is retried early.
//!
//! | Error Type | Meaning |
//! |------------|---------|
//! | [`Error::NotReachable`] | Network failure before a response arrived |
//! | [`Error::Http`] | Provider answered with a non-success status |
//! | [`Error::Request`] | Response body could not be read |
//! | [`Error::Decode`] | Body was not the expected JSON document |
//! | [`Error::InvalidUrl`] | Base URL is not http(s) |
//! | [`Error::InvalidConfig`] | Channel id, key, or thresholds are unusable |

use thiserror::Error;

/// Errors that can occur while talking to the telemetry provider.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The provider could not be reached.
    ///
    /// `url` never contains the read key.
    #[error("Telemetry source not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed after the connection was made.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-success status.
    #[error("Telemetry source returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not a valid feed document.
    #[error("Malformed feed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Whether this error came from the transport rather than from the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::NotReachable { .. } | Error::Request(_) | Error::Http { .. }
        )
    }
}

/// Result type alias using farmwatch-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
