use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the semopx workspace.
///
/// Variants separate failures worth retrying (transport hiccups and responses
/// missing expected structure) from defects in configuration or input that a
/// retry cannot fix.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SemopxError {
    /// The network call failed or the server answered with a non-success status.
    #[error("{connector} failed: {msg}")]
    Transport {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A response lacked an expected field or had an unexpected shape.
    #[error("unexpected response structure: {0}")]
    Structure(String),

    /// The client configuration is unusable (e.g. an unknown timezone name).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A value was present but could not be interpreted.
    #[error("data issue: {0}")]
    Data(String),

    /// A fetch exceeded the configured deadline.
    #[error("request timed out: {operation}")]
    RequestTimeout {
        /// Operation that ran out of time.
        operation: String,
    },
}

impl SemopxError {
    /// Helper: build a `Transport` error with the connector name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Structure` error.
    pub fn structure(what: impl Into<String>) -> Self {
        Self::Structure(what.into())
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(operation: impl Into<String>) -> Self {
        Self::RequestTimeout {
            operation: operation.into(),
        }
    }

    /// Returns true if the failure may be transient and the whole fetch should be retried.
    ///
    /// Structural errors count as transient: the upstream index is occasionally
    /// served half-populated and recovers on the next request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Structure(_))
    }
}
