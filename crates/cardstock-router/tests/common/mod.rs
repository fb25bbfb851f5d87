//! In-memory gateway fake and fixtures shared by the router tests.
#![allow(dead_code)] // each test binary uses a different slice of this

use async_trait::async_trait;
use cardstock_gateway::{CardsFetch, CardsQuery, Gateway, GatewayError, GatewayResult};
use cardstock_model::{Card, CardId, Deck, DeckId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Gateway fake backed by hash maps, recording every call it serves.
pub struct FakeGateway {
    root: DeckId,
    decks: Mutex<HashMap<DeckId, Deck>>,
    cards: Mutex<HashMap<CardId, Card>>,
    cards_by_deck: Mutex<HashMap<DeckId, Vec<Card>>>,
    ancestors: Mutex<HashMap<DeckId, Vec<Deck>>>,
    broken_decks: Mutex<HashSet<DeckId>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new(root: DeckId) -> Self {
        Self {
            root,
            decks: Mutex::new(HashMap::new()),
            cards: Mutex::new(HashMap::new()),
            cards_by_deck: Mutex::new(HashMap::new()),
            ancestors: Mutex::new(HashMap::new()),
            broken_decks: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `GET /decks/{id}` answer with an unhandled status.
    pub fn with_broken_deck(self, id: DeckId) -> Self {
        self.broken_decks.lock().unwrap().insert(id);
        self
    }

    pub fn with_deck(self, deck: Deck) -> Self {
        self.decks.lock().unwrap().insert(deck.id, deck);
        self
    }

    pub fn with_card(self, card: Card) -> Self {
        self.cards_by_deck
            .lock()
            .unwrap()
            .entry(card.deck)
            .or_default()
            .push(card.clone());
        self.cards.lock().unwrap().insert(card.id, card);
        self
    }

    pub fn with_cards(self, deck: DeckId, count: u64) -> Self {
        let mut result = self;
        for n in 1..=count {
            result = result.with_card(card(deck * 1000 + n, deck));
        }
        result
    }

    pub fn with_ancestors(self, id: DeckId, chain: Vec<Deck>) -> Self {
        self.ancestors.lock().unwrap().insert(id, chain);
        self
    }

    /// Every endpoint served so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn deck(&self, id: DeckId) -> GatewayResult<Option<Deck>> {
        self.record(format!("GET /decks/{id}"));
        if self.broken_decks.lock().unwrap().contains(&id) {
            return Err(GatewayError::unexpected_status(format!("/decks/{id}"), 500));
        }
        Ok(self.decks.lock().unwrap().get(&id).cloned())
    }

    async fn root_deck(&self) -> GatewayResult<DeckId> {
        self.record("GET /decks/root".to_string());
        Ok(self.root)
    }

    async fn ancestors(&self, id: DeckId) -> GatewayResult<Vec<Deck>> {
        self.record(format!("GET /decks/{id}/ancestors"));
        Ok(self
            .ancestors
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn card_count(&self, deck: DeckId, page: u64) -> GatewayResult<u64> {
        self.record(format!("GET /decks/{deck}/cards/count?page={page}"));
        Ok(self
            .cards_by_deck
            .lock()
            .unwrap()
            .get(&deck)
            .map(|cards| cards.len() as u64)
            .unwrap_or(0))
    }

    async fn cards(&self, deck: DeckId, query: &CardsQuery) -> GatewayResult<CardsFetch> {
        self.record(format!(
            "GET /decks/{deck}/cards?page={}&per_page={}",
            query.page, query.per_page
        ));
        let cards = self
            .cards_by_deck
            .lock()
            .unwrap()
            .get(&deck)
            .cloned()
            .unwrap_or_default();
        if cards.is_empty() {
            return Ok(CardsFetch::Missing);
        }
        let start = (query.page.saturating_sub(1) * query.per_page) as usize;
        if start >= cards.len() {
            return Ok(CardsFetch::OutOfRange);
        }
        let end = (start + query.per_page as usize).min(cards.len());
        Ok(CardsFetch::Page(cards[start..end].to_vec()))
    }

    async fn card(&self, id: CardId) -> GatewayResult<Option<Card>> {
        self.record(format!("GET /cards/{id}"));
        Ok(self.cards.lock().unwrap().get(&id).cloned())
    }
}

pub fn deck(id: DeckId, name: &str) -> Deck {
    Deck {
        id,
        name: name.to_string(),
        description: String::new(),
        children: Vec::new(),
        parent: None,
        has_parent: false,
    }
}

pub fn card(id: CardId, deck: DeckId) -> Card {
    Card {
        id,
        title: format!("card {id}"),
        description: String::new(),
        front: String::new(),
        back: String::new(),
        deck,
        created_at: 0,
        updated_at: 0,
        deck_path: vec![deck],
    }
}

/// Poll a condition until it holds, panicking after ~1s of retries.
pub async fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for: {what}");
}
