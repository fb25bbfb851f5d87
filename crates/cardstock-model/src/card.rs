//! Card snapshots as served by the REST backend.

use crate::{CardId, DeckId};
use serde::{Deserialize, Serialize};

/// A flashcard belonging to exactly one deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique positive identifier.
    pub id: CardId,
    /// Card title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Front side contents.
    #[serde(default)]
    pub front: String,
    /// Back side contents.
    #[serde(default)]
    pub back: String,
    /// Owning deck.
    pub deck: DeckId,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created_at: i64,
    /// Unix timestamp of the last update.
    #[serde(default)]
    pub updated_at: i64,
    /// Deck ids from the root down to the owning deck.
    #[serde(default)]
    pub deck_path: Vec<DeckId>,
}
