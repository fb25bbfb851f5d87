//! Deck snapshots as served by the REST backend.

use crate::DeckId;
use serde::{Deserialize, Serialize};

/// A deck in the hierarchy.
///
/// Identity is `id`; a renamed deck keeps its id and gets a new canonical
/// slug. The copy cached at `deck.self` may be stale relative to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Unique positive identifier.
    pub id: DeckId,
    /// Display name. Renames trigger slug recomputation.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Ids of direct child decks.
    #[serde(default)]
    pub children: Vec<DeckId>,
    /// Direct parent, absent for the root deck.
    #[serde(default)]
    pub parent: Option<DeckId>,
    /// Whether this deck has a parent.
    #[serde(default)]
    pub has_parent: bool,
}

/// Ordered deck snapshots from the root to the current deck.
///
/// The last element's id always equals the current deck's id; same-id
/// updates replace the last element in place.
pub type Breadcrumb = Vec<Deck>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deck_deserializes_minimal_response() {
        let deck: Deck = serde_json::from_value(json!({
            "id": 7,
            "name": "Foo"
        }))
        .unwrap();
        assert_eq!(deck.id, 7);
        assert_eq!(deck.name, "Foo");
        assert!(deck.children.is_empty());
        assert_eq!(deck.parent, None);
        assert!(!deck.has_parent);
    }

    #[test]
    fn test_deck_deserializes_full_response() {
        let deck: Deck = serde_json::from_value(json!({
            "id": 3,
            "name": "Verbs",
            "description": "irregular verbs",
            "children": [4, 5],
            "parent": 1,
            "has_parent": true
        }))
        .unwrap();
        assert_eq!(deck.children, vec![4, 5]);
        assert_eq!(deck.parent, Some(1));
        assert!(deck.has_parent);
    }
}
