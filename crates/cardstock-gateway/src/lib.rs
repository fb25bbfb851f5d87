//! REST gateway for the cardstock client.
//!
//! The [`Gateway`] trait is the seam between the routing core and the
//! backend: one method per consumed endpoint, each returning the normalized
//! outcome callers dispatch on. [`HttpGateway`] is the reqwest-backed
//! implementation; tests substitute in-memory fakes.

mod decode;
mod error;
mod http;

pub use error::{GatewayError, GatewayResult};
pub use http::{GatewayConfig, HttpGateway};

use async_trait::async_trait;
use cardstock_model::{Card, CardId, CardsSort, Deck, DeckId, SortOrder, CARDS_PER_PAGE};

/// Parameters for a cards-listing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardsQuery {
    /// Requested 1-based page.
    pub page: u64,
    /// Page size.
    pub per_page: u64,
    /// Optional server-side sort key.
    pub sort: Option<CardsSort>,
    /// Optional sort direction.
    pub order: Option<SortOrder>,
}

impl CardsQuery {
    /// A plain page fetch with the default page size and no sorting.
    pub fn page(page: u64) -> Self {
        Self {
            page,
            per_page: CARDS_PER_PAGE,
            sort: None,
            order: None,
        }
    }
}

/// Outcome of a cards-listing fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CardsFetch {
    /// 200: one page of cards.
    Page(Vec<Card>),
    /// 400: the requested page is out of range; callers retry page 1 once.
    OutOfRange,
    /// 404: the deck has no card listing; callers substitute an empty list.
    Missing,
}

/// Async boundary to the REST backend.
///
/// Implementations normalize each endpoint's documented statuses into
/// values; any status outside the tables surfaces as
/// [`GatewayError::UnexpectedStatus`].
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /decks/:id` — `Some` on 200, `None` on 404.
    async fn deck(&self, id: DeckId) -> GatewayResult<Option<Deck>>;

    /// `GET /decks/root` — the root deck id. Assumed to succeed.
    async fn root_deck(&self) -> GatewayResult<DeckId>;

    /// `GET /decks/:id/ancestors` — farthest-to-nearest ancestor decks;
    /// empty on 404.
    async fn ancestors(&self, id: DeckId) -> GatewayResult<Vec<Deck>>;

    /// `GET /decks/:id/cards/count?page=N` — total card count.
    ///
    /// The page parameter is an upstream API quirk, preserved as-is.
    /// A missing or malformed total decodes as 0; callers treat transport
    /// errors as 0 too.
    async fn card_count(&self, deck: DeckId, page: u64) -> GatewayResult<u64>;

    /// `GET /decks/:id/cards?page=N&per_page=M[&sort=..&order=..]`.
    async fn cards(&self, deck: DeckId, query: &CardsQuery) -> GatewayResult<CardsFetch>;

    /// `GET /cards/:id` — `Some` on 200, `None` on 404.
    async fn card(&self, id: CardId) -> GatewayResult<Option<Card>>;
}
