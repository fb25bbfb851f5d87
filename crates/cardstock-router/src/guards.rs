//! The guards wired into the route table.
//!
//! `EnsureDeck`, `EnsureCard`, and `EnsureCardsList` are the load-bearing
//! stages; the rest are tail stages that mark what the dashboard should
//! show once the data is in place.

use crate::guard::{Flow, Guard, RouteContext};
use crate::loader::{load_cards_list, load_deck, spawn_cards_list_load, spawn_children_load};
use crate::nav::deck_url;
use crate::{RouteError, RouteResult};
use async_trait::async_trait;
use cardstock_model::{
    parse_id, paths, slug, Card, DashboardView, Deck, RouteHandler,
};
use cardstock_state::{StateResult, StateTree};

/// Reset the transient dashboard flags before every dispatch.
///
/// Runs for every match, redirects included, so no per-navigation scratch
/// state leaks across transitions.
pub(crate) fn reset_transient(state: &StateTree) -> StateResult<()> {
    state.set(&paths::decks_editing(), false)?;
    state.set(&paths::decks_creating_new(), false)?;
    state.clear(&paths::decks_finish_editing());
    state.set(&paths::cards_creating_new(), false)?;
    state.set(&paths::cards_page(), 1)?;
    state.set(&paths::cards_viewing_profile(), false)?;
    Ok(())
}

/// Resolve and cache the deck named by `:id`, then dispatch on the slug.
///
/// Stages, in order:
/// 1. parse `:id` — invalid or non-positive goes to the default route
///    without any REST call;
/// 2. reuse the cached `deck.self` when its id matches, fetch otherwise
///    (404 goes to the default route, the fetched deck overwrites the
///    cache);
/// 3. kick off a children load when children are uncached or the deck
///    identity changed — fire-and-forget, the chain does not wait, and a
///    late result may land after further navigation;
/// 4. no `:slug` → redirect to the canonical deck URL; wrong `:slug` →
///    redirect to the canonical deck URL; otherwise point `route.handler`
///    at the dashboard and advance.
pub struct EnsureDeck;

#[async_trait]
impl Guard for EnsureDeck {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        let raw = ctx.params.require("id")?;
        let Some(id) = parse_id(raw) else {
            return Ok(Flow::ToRoot);
        };

        let cached: Option<Deck> = ctx.state.get_as(&paths::deck_self())?;
        let previous_id = cached.as_ref().map(|deck| deck.id);

        let deck = match cached {
            Some(deck) if deck.id == id => deck,
            _ => {
                let Some(deck) = load_deck(ctx.gateway.as_ref(), id).await? else {
                    return Ok(Flow::ToRoot);
                };
                ctx.state.set_as(&paths::deck_self(), &deck)?;
                deck
            }
        };

        let children_cached = ctx.state.get(&paths::deck_children()).is_some();
        if !children_cached || previous_id != Some(id) {
            spawn_children_load(
                ctx.state.clone(),
                ctx.gateway.clone(),
                deck.children.clone(),
            );
        }

        let Some(slug_param) = ctx.params.get("slug") else {
            return Ok(Flow::Redirect(deck_url(&deck)));
        };
        if slug_param != slug(&deck.name, deck.id) {
            return Ok(Flow::Redirect(deck_url(&deck)));
        }

        ctx.state
            .set_as(&paths::route_handler(), &RouteHandler::Dashboard)?;
        Ok(Flow::Next)
    }
}

/// Resolve and cache the card named by `:id`, plus its owning deck.
///
/// The owning deck is always refetched through the same deck-load primitive
/// as `EnsureDeck`; a 404 on either lookup goes to the default route. The
/// cards listing for the parent deck loads in the background — the card
/// profile renders without it.
pub struct EnsureCard;

#[async_trait]
impl Guard for EnsureCard {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        let raw = ctx.params.require("id")?;
        let Some(id) = parse_id(raw) else {
            return Ok(Flow::ToRoot);
        };

        let cached: Option<Card> = ctx.state.get_as(&paths::card_self())?;
        let card = match cached {
            Some(card) if card.id == id => card,
            _ => {
                let Some(card) = ctx.gateway.card(id).await? else {
                    return Ok(Flow::ToRoot);
                };
                ctx.state.set_as(&paths::card_self(), &card)?;
                card
            }
        };

        let Some(deck) = load_deck(ctx.gateway.as_ref(), card.deck).await? else {
            return Ok(Flow::ToRoot);
        };
        ctx.state.set_as(&paths::deck_self(), &deck)?;

        spawn_cards_list_load(ctx.state.clone(), ctx.gateway.clone(), deck.id);

        ctx.state
            .set_as(&paths::route_handler(), &RouteHandler::Dashboard)?;
        Ok(Flow::Next)
    }
}

/// Load the cards listing for the cached deck, blocking the chain.
///
/// Parses `page` (default 1, non-numeric or non-positive clamps to 1) and
/// the optional `sort`/`order` parameters, then runs the cards-list loader
/// to completion before advancing. Requires `EnsureDeck` to have cached the
/// deck earlier in the chain.
pub struct EnsureCardsList;

#[async_trait]
impl Guard for EnsureCardsList {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        let page = match ctx.location.query("page") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|page| *page > 0)
                .map(|page| page as u64)
                .unwrap_or(1),
            None => 1,
        };
        let sort = ctx
            .location
            .query("sort")
            .and_then(cardstock_model::CardsSort::parse);
        let order = ctx
            .location
            .query("order")
            .and_then(cardstock_model::SortOrder::parse);

        let deck: Deck = ctx
            .state
            .get_as(&paths::deck_self())?
            .ok_or_else(|| RouteError::contract("cards route reached with no deck cached"))?;

        load_cards_list(&ctx.state, ctx.gateway.as_ref(), deck.id, page, sort, order).await?;
        Ok(Flow::Next)
    }
}

/// Show the child-deck pane.
pub struct ShowDecks;

#[async_trait]
impl Guard for ShowDecks {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        ctx.state
            .set_as(&paths::dashboard_view(), &DashboardView::Decks)?;
        Ok(Flow::Stop)
    }
}

/// Show the deck-settings editor.
pub struct EditDeckSettings;

#[async_trait]
impl Guard for EditDeckSettings {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        ctx.state.set(&paths::decks_editing(), true)?;
        ctx.state
            .set_as(&paths::dashboard_view(), &DashboardView::Decks)?;
        Ok(Flow::Stop)
    }
}

/// Show the cards pane.
pub struct ShowCards;

#[async_trait]
impl Guard for ShowCards {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        ctx.state
            .set_as(&paths::dashboard_view(), &DashboardView::Cards)?;
        Ok(Flow::Stop)
    }
}

/// Show the new-card form.
pub struct NewCard;

#[async_trait]
impl Guard for NewCard {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        ctx.state.set(&paths::cards_creating_new(), true)?;
        ctx.state
            .set_as(&paths::dashboard_view(), &DashboardView::Cards)?;
        Ok(Flow::Stop)
    }
}

/// Show a single card's profile.
pub struct CardProfile;

#[async_trait]
impl Guard for CardProfile {
    async fn run(&self, ctx: &RouteContext) -> RouteResult<Flow> {
        ctx.state.set(&paths::cards_viewing_profile(), true)?;
        ctx.state
            .set_as(&paths::dashboard_view(), &DashboardView::Cards)?;
        Ok(Flow::Stop)
    }
}

/// Go to the default route.
///
/// Tail of `/deck/:id` — normally unreachable, since `EnsureDeck` redirects
/// slugless locations first.
pub struct GoDefault;

#[async_trait]
impl Guard for GoDefault {
    async fn run(&self, _ctx: &RouteContext) -> RouteResult<Flow> {
        Ok(Flow::ToRoot)
    }
}

/// Accept the location without touching state.
///
/// Wired to routes that exist in the URL surface but render nothing yet:
/// `/card/:id/edit`, `/review`, `/review/deck/:id`.
pub struct Hold;

#[async_trait]
impl Guard for Hold {
    async fn run(&self, _ctx: &RouteContext) -> RouteResult<Flow> {
        Ok(Flow::Stop)
    }
}
