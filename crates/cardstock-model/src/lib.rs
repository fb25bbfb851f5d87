//! Domain contract shared across the cardstock crates.
//!
//! Decks, cards, and stashes as the REST backend serves them, the slug
//! generator used to build and validate URLs, the canonical state-path
//! registry, and the dashboard constants.

mod card;
mod dashboard;
mod deck;
mod id;
pub mod paths;
mod slug;
mod stash;

pub use card::Card;
pub use dashboard::{CardsSort, DashboardView, RouteHandler, SortOrder, CARDS_PER_PAGE};
pub use deck::{Breadcrumb, Deck};
pub use id::{parse_id, CardId, DeckId, StashId};
pub use slug::slug;
pub use stash::Stash;
