//! Gateway error types.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from talking to the REST backend.
///
/// Statuses the endpoint tables enumerate are mapped to values, not errors;
/// `UnexpectedStatus` is the fatal remainder.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered with a status no caller handles.
    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        /// Endpoint path that was requested.
        endpoint: String,
        /// The offending HTTP status.
        status: u16,
    },

    /// The request never completed (connection, timeout, client setup).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response carried a body that does not match the contract.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Create an unexpected-status error.
    #[inline]
    pub fn unexpected_status(endpoint: impl Into<String>, status: u16) -> Self {
        GatewayError::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        GatewayError::Transport(message.into())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
