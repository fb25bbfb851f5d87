//! Facade crate for the cardstock client core.
//!
//! Re-exports the crates a consumer wires together: the observable state
//! tree, the domain model, the REST gateway, and the routing core.
//!
//! ```no_run
//! use cardstock::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let state = Arc::new(StateTree::new());
//! let gateway = Arc::new(HttpGateway::new(&GatewayConfig::default())?);
//! let app = App::new(state, gateway);
//! app.bootstrap("/");
//! # Ok(())
//! # }
//! ```

pub use cardstock_gateway as gateway;
pub use cardstock_model as model;
pub use cardstock_router as router;
pub use cardstock_state as state;

/// The types most consumers need.
pub mod prelude {
    pub use cardstock_gateway::{Gateway, GatewayConfig, GatewayError, HttpGateway};
    pub use cardstock_model::{
        paths, slug, Breadcrumb, Card, CardsSort, DashboardView, Deck, RouteHandler, SortOrder,
        Stash,
    };
    pub use cardstock_router::{App, Location, Navigator, PageOptions, RouteError};
    pub use cardstock_state::{path, Path, StateTree};
}
