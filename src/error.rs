//! Error types for the fetchkit facade.

use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) construction and calls.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Invalid or incomplete client configuration. Raised synchronously from
    /// [`ApiClient::new`](crate::ApiClient::new).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Transport-level failure reported by reqwest (DNS, connect, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP status error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },
}

impl FetchError {
    /// Convenience constructor for configuration errors.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError(message.into())
    }

    /// HTTP status associated with this error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::ConfigurationError(_) => None,
        }
    }
}
