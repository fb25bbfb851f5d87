//! The guard seam: one async stage in a matched route's chain.

use crate::{Location, RouteParams, RouteResult};
use async_trait::async_trait;
use cardstock_gateway::Gateway;
use cardstock_state::StateTree;
use std::sync::Arc;

/// What a guard decided about the navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Advance to the next stage in the chain.
    Next,
    /// End the chain; the location is accepted as-is.
    Stop,
    /// Replace the location and re-dispatch. The chain does not advance.
    Redirect(String),
    /// Go to the default route: the root deck's canonical URL, waiting for
    /// the root id to load if it has not yet.
    ToRoot,
}

/// Everything a navigation stage gets to work with.
///
/// Dependencies arrive by injection: the shared state tree and the gateway
/// seam are cloned `Arc`s, so a guard can hand them to a background task it
/// spawns.
pub struct RouteContext {
    /// Parameters captured by the matched pattern.
    pub params: RouteParams,
    /// The location being dispatched (for query parameters).
    pub location: Location,
    /// The shared application state tree.
    pub state: Arc<StateTree>,
    /// The REST gateway.
    pub gateway: Arc<dyn Gateway>,
}

/// One stage of a guarded route.
///
/// Stages run strictly in sequence; a stage's asynchronous work completes
/// before the next stage starts. A stage either advances, accepts, or
/// short-circuits with a redirect. Errors are the fatal class — see
/// [`RouteError`](crate::RouteError).
#[async_trait]
pub trait Guard: Send + Sync {
    /// Run this stage.
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow>;
}
