//! The navigation facade: named transitions over the dispatcher.
//!
//! Each transition resolves its subject — a deck, card, or stash — from the
//! supplied argument or from the cache, builds the canonical URL, and sends
//! it to the dispatcher. The resolution is written back to the cache
//! unconditionally (a read resolves and refreshes), so the cache always
//! reflects the entity last navigated to.

use crate::{RouteError, RouteResult};
use cardstock_model::{paths, slug, Card, CardsSort, Deck, SortOrder, Stash};
use cardstock_state::StateTree;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A navigation request headed for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Target location.
    pub location: String,
    /// Whether this replaces the current history entry. History itself is a
    /// browser concern outside this layer; the flag reaches tracing only.
    pub replace: bool,
}

/// Optional paging/sorting parameters for listing transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// 1-based page; serialized as `page=1` when absent.
    pub page: Option<u64>,
    /// Server-side sort key.
    pub sort: Option<CardsSort>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

/// Named route transitions.
///
/// Cloneable; every clone feeds the same dispatcher.
#[derive(Clone)]
pub struct Navigator {
    state: Arc<StateTree>,
    transitions: mpsc::UnboundedSender<Transition>,
}

impl Navigator {
    pub(crate) fn new(
        state: Arc<StateTree>,
        transitions: mpsc::UnboundedSender<Transition>,
    ) -> Self {
        Self { state, transitions }
    }

    /// Go to a deck's overview.
    pub fn to_deck(&self, deck: Option<Deck>) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(deck_url(&deck), false)
    }

    /// Replace the current location with a deck's overview.
    pub fn redirect_to_deck(&self, deck: Option<Deck>) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(deck_url(&deck), true)
    }

    /// Go to a deck's settings editor.
    pub fn to_deck_settings(&self, deck: Option<Deck>) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(format!("{}/settings", deck_url(&deck)), false)
    }

    /// Go to a deck's cards listing.
    pub fn to_deck_cards(&self, deck: Option<Deck>, options: PageOptions) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(deck_cards_url(&deck, options), false)
    }

    /// Replace the current location with a deck's cards listing.
    pub fn redirect_to_deck_cards(
        &self,
        deck: Option<Deck>,
        options: PageOptions,
    ) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(deck_cards_url(&deck, options), true)
    }

    /// Go to a deck's new-card form.
    pub fn to_deck_cards_new(&self, deck: Option<Deck>) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(format!("{}/cards/new", deck_url(&deck)), false)
    }

    /// Go to a deck's review session.
    pub fn to_deck_review(&self, deck: Option<Deck>) -> RouteResult<()> {
        let deck = self.resolve_deck(deck)?;
        self.send(format!("/review/deck/{}", deck.id), false)
    }

    /// Go to a card's profile.
    pub fn to_card(&self, card: Option<Card>) -> RouteResult<()> {
        let card = self.resolve_card(card)?;
        self.send(format!("/card/{}", card.id), false)
    }

    /// Go to a card's profile editor.
    pub fn to_card_edit(&self, card: Option<Card>) -> RouteResult<()> {
        let card = self.resolve_card(card)?;
        self.send(format!("/card/{}/edit", card.id), false)
    }

    /// Go to the stash listing.
    pub fn to_stashes(&self) -> RouteResult<()> {
        self.send("/stashes".to_string(), false)
    }

    /// Go to a stash's profile.
    pub fn to_stash(&self, stash: Option<Stash>, options: PageOptions) -> RouteResult<()> {
        let stash = self.resolve_stash(stash)?;
        self.send(
            format!("/stashes/{}{}", stash.id, listing_query(options)),
            false,
        )
    }

    fn resolve_deck(&self, supplied: Option<Deck>) -> RouteResult<Deck> {
        let deck = match supplied {
            Some(deck) => deck,
            None => self
                .state
                .get_as(&paths::deck_self())?
                .ok_or_else(|| RouteError::contract("no deck supplied and none cached"))?,
        };
        self.state.set_as(&paths::deck_self(), &deck)?;
        Ok(deck)
    }

    fn resolve_card(&self, supplied: Option<Card>) -> RouteResult<Card> {
        let card = match supplied {
            Some(card) => card,
            None => self
                .state
                .get_as(&paths::card_self())?
                .ok_or_else(|| RouteError::contract("no card supplied and none cached"))?,
        };
        self.state.set_as(&paths::card_self(), &card)?;
        Ok(card)
    }

    fn resolve_stash(&self, supplied: Option<Stash>) -> RouteResult<Stash> {
        let stash = match supplied {
            Some(stash) => stash,
            None => self
                .state
                .get_as(&paths::stash_self())?
                .ok_or_else(|| RouteError::contract("no stash supplied and none cached"))?,
        };
        self.state.set_as(&paths::stash_self(), &stash)?;
        Ok(stash)
    }

    fn send(&self, location: String, replace: bool) -> RouteResult<()> {
        self.transitions
            .send(Transition { location, replace })
            .map_err(|_| RouteError::contract("navigation dispatcher is gone"))
    }
}

/// Canonical overview URL for a deck.
pub(crate) fn deck_url(deck: &Deck) -> String {
    format!("/deck/{}/{}", deck.id, slug(&deck.name, deck.id))
}

/// Canonical cards-listing URL for a deck.
fn deck_cards_url(deck: &Deck, options: PageOptions) -> String {
    format!("{}/cards{}", deck_url(deck), listing_query(options))
}

/// Serialize paging/sorting into a query string. `page` always appears.
fn listing_query(options: PageOptions) -> String {
    let mut query = format!("?page={}", options.page.unwrap_or(1));
    if let Some(sort) = options.sort {
        query.push_str("&sort=");
        query.push_str(sort.as_str());
    }
    if let Some(order) = options.order {
        query.push_str("&order=");
        query.push_str(order.as_str());
    }
    query
}
