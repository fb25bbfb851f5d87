//! Shared data-loading subroutines used by the route guards.

use crate::RouteResult;
use cardstock_gateway::{CardsFetch, CardsQuery, Gateway};
use cardstock_model::{paths, Card, CardsSort, Deck, DeckId, SortOrder, CARDS_PER_PAGE};
use cardstock_state::StateTree;
use std::sync::Arc;

/// Load a deck by id. `None` means the backend has no such deck; callers
/// fall back to the default route.
pub async fn load_deck(gateway: &dyn Gateway, id: DeckId) -> RouteResult<Option<Deck>> {
    Ok(gateway.deck(id).await?)
}

/// Load the full child decks of the current deck into `deck.children`.
///
/// Children that 404 mid-load (deleted concurrently) are skipped.
pub async fn load_children(
    state: &StateTree,
    gateway: &dyn Gateway,
    children: &[DeckId],
) -> RouteResult<()> {
    let mut decks = Vec::with_capacity(children.len());
    for &child in children {
        if let Some(deck) = gateway.deck(child).await? {
            decks.push(deck);
        }
    }
    state.set_as(&paths::deck_children(), &decks)?;
    Ok(())
}

/// Load one page of the current deck's cards listing.
///
/// Writes `dashboard.cards.{total,page,numOfPages,list}`. The fetch uses the
/// *requested* page; when the backend reports it out of range (400) the
/// fetch retries page 1 exactly once. The clamped page number is what lands
/// in the tree.
pub async fn load_cards_list(
    state: &StateTree,
    gateway: &dyn Gateway,
    deck: DeckId,
    page: u64,
    sort: Option<CardsSort>,
    order: Option<SortOrder>,
) -> RouteResult<()> {
    // count failures read as an empty deck
    let total = match gateway.card_count(deck, page).await {
        Ok(total) => total,
        Err(err) => {
            tracing::warn!(error = %err, deck, "card count fetch failed, treating as empty");
            0
        }
    };
    state.set(&paths::cards_total(), total)?;

    if total == 0 {
        state.set_as(&paths::cards_list(), &Vec::<Card>::new())?;
        state.set(&paths::cards_num_of_pages(), 0)?;
        state.set(&paths::cards_page(), 1)?;
        return Ok(());
    }

    let clamped = if page.saturating_sub(1) * CARDS_PER_PAGE >= total {
        1
    } else {
        page
    };
    state.set(&paths::cards_page(), clamped)?;
    state.set(&paths::cards_num_of_pages(), total.div_ceil(CARDS_PER_PAGE))?;

    let mut query = CardsQuery {
        page,
        per_page: CARDS_PER_PAGE,
        sort,
        order,
    };
    let fetched = match gateway.cards(deck, &query).await? {
        CardsFetch::OutOfRange => {
            query.page = 1;
            gateway.cards(deck, &query).await?
        }
        fetched => fetched,
    };
    match fetched {
        CardsFetch::Page(cards) => state.set_as(&paths::cards_list(), &cards)?,
        CardsFetch::Missing => state.set_as(&paths::cards_list(), &Vec::<Card>::new())?,
        CardsFetch::OutOfRange => {
            // page 1 reported out of range even though the count was
            // positive; the retry is single-shot, so settle for empty
            tracing::warn!(deck, "cards page 1 out of range after retry");
            state.set_as(&paths::cards_list(), &Vec::<Card>::new())?;
        }
    }
    Ok(())
}

/// Fire-and-forget children load.
///
/// The result may race with navigation: a late response overwrites
/// `deck.children` for a deck the user may already have left.
pub(crate) fn spawn_children_load(
    state: Arc<StateTree>,
    gateway: Arc<dyn Gateway>,
    children: Vec<DeckId>,
) {
    tokio::spawn(async move {
        if let Err(err) = load_children(&state, gateway.as_ref(), &children).await {
            tracing::error!(error = %err, "deck children load failed");
        }
    });
}

/// Fire-and-forget cards-list load, same racing contract as
/// [`spawn_children_load`].
pub(crate) fn spawn_cards_list_load(state: Arc<StateTree>, gateway: Arc<dyn Gateway>, deck: DeckId) {
    tokio::spawn(async move {
        if let Err(err) = load_cards_list(&state, gateway.as_ref(), deck, 1, None, None).await {
            tracing::error!(error = %err, deck, "cards list load failed");
        }
    });
}
