//! Routing error types.

use cardstock_gateway::GatewayError;
use cardstock_state::StateError;
use thiserror::Error;

/// Result type alias for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors that end a guard chain without a recovery redirect.
///
/// Recoverable conditions — malformed ids, 404s, slug mismatches — never
/// surface here; guards resolve them with redirects. What remains is the
/// fatal class: contract violations and statuses nobody handles.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A guard ran on a route pattern missing one of its parameters.
    /// Correct wiring never produces this.
    #[error("route parameter missing: {name}")]
    MissingParam {
        /// The absent parameter.
        name: &'static str,
    },

    /// A chain was entered in a state its wiring is supposed to rule out.
    #[error("route contract violated: {0}")]
    Contract(String),

    /// Redirects chained past the hop limit.
    #[error("redirect limit exceeded at {location}")]
    RedirectLoop {
        /// The last location in the chain.
        location: String,
    },

    /// The REST gateway failed in a way no guard recovers from.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The state tree rejected a read or write.
    #[error(transparent)]
    State(#[from] StateError),
}

impl RouteError {
    /// Create a contract-violation error.
    #[inline]
    pub fn contract(message: impl Into<String>) -> Self {
        RouteError::Contract(message.into())
    }
}
