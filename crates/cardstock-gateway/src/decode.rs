//! Pure response decoders: `(status, body)` to normalized outcomes.
//!
//! Splitting the status tables out of the HTTP client keeps every mapping
//! unit-testable without a server.

use crate::{CardsFetch, GatewayError, GatewayResult};
use cardstock_model::{Card, Deck, DeckId};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct RootBody {
    id: DeckId,
}

#[derive(Deserialize)]
struct CountBody {
    #[serde(default)]
    total: u64,
}

/// 200 → deck, 404 → `None`, other → unexpected.
pub(crate) fn decode_deck(endpoint: &str, status: u16, body: Value) -> GatewayResult<Option<Deck>> {
    match status {
        200 => Ok(Some(serde_json::from_value(body)?)),
        404 => Ok(None),
        other => Err(GatewayError::unexpected_status(endpoint, other)),
    }
}

/// 200 → card, 404 → `None`, other → unexpected.
pub(crate) fn decode_card(endpoint: &str, status: u16, body: Value) -> GatewayResult<Option<Card>> {
    match status {
        200 => Ok(Some(serde_json::from_value(body)?)),
        404 => Ok(None),
        other => Err(GatewayError::unexpected_status(endpoint, other)),
    }
}

/// 200 → root deck id, other → unexpected.
pub(crate) fn decode_root(endpoint: &str, status: u16, body: Value) -> GatewayResult<DeckId> {
    match status {
        200 => {
            let root: RootBody = serde_json::from_value(body)?;
            Ok(root.id)
        }
        other => Err(GatewayError::unexpected_status(endpoint, other)),
    }
}

/// 200 → ancestor decks, 404 → empty, other → unexpected.
pub(crate) fn decode_ancestors(
    endpoint: &str,
    status: u16,
    body: Value,
) -> GatewayResult<Vec<Deck>> {
    match status {
        200 => Ok(serde_json::from_value(body)?),
        404 => Ok(Vec::new()),
        other => Err(GatewayError::unexpected_status(endpoint, other)),
    }
}

/// Any failure to produce a total — wrong status, missing field, wrong
/// shape — decodes as 0.
pub(crate) fn decode_count(status: u16, body: Value) -> u64 {
    if status != 200 {
        return 0;
    }
    serde_json::from_value::<CountBody>(body)
        .map(|c| c.total)
        .unwrap_or(0)
}

/// 200 → page, 400 → out of range, 404 → missing, other → unexpected.
pub(crate) fn decode_cards(endpoint: &str, status: u16, body: Value) -> GatewayResult<CardsFetch> {
    match status {
        200 => Ok(CardsFetch::Page(serde_json::from_value(body)?)),
        400 => Ok(CardsFetch::OutOfRange),
        404 => Ok(CardsFetch::Missing),
        other => Err(GatewayError::unexpected_status(endpoint, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deck_body() -> Value {
        json!({"id": 7, "name": "Foo", "children": [8]})
    }

    #[test]
    fn test_decode_deck_statuses() {
        let deck = decode_deck("/decks/7", 200, deck_body()).unwrap().unwrap();
        assert_eq!(deck.id, 7);

        assert_eq!(decode_deck("/decks/7", 404, Value::Null).unwrap(), None);

        let err = decode_deck("/decks/7", 500, Value::Null).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UnexpectedStatus { status: 500, .. }
        ));
    }

    #[test]
    fn test_decode_deck_malformed_body() {
        let err = decode_deck("/decks/7", 200, json!({"nope": true})).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_decode_card_statuses() {
        let body = json!({"id": 3, "title": "t", "deck": 7});
        let card = decode_card("/cards/3", 200, body).unwrap().unwrap();
        assert_eq!(card.deck, 7);

        assert_eq!(decode_card("/cards/3", 404, Value::Null).unwrap(), None);
        assert!(decode_card("/cards/3", 502, Value::Null).is_err());
    }

    #[test]
    fn test_decode_root() {
        assert_eq!(decode_root("/decks/root", 200, json!({"id": 1})).unwrap(), 1);
        assert!(decode_root("/decks/root", 500, Value::Null).is_err());
    }

    #[test]
    fn test_decode_ancestors() {
        let body = json!([{"id": 1, "name": "root"}, {"id": 2, "name": "mid"}]);
        let chain = decode_ancestors("/decks/3/ancestors", 200, body).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].id, 1);

        assert!(decode_ancestors("/decks/3/ancestors", 404, Value::Null)
            .unwrap()
            .is_empty());
        assert!(decode_ancestors("/decks/3/ancestors", 500, Value::Null).is_err());
    }

    #[test]
    fn test_decode_count_lenient() {
        assert_eq!(decode_count(200, json!({"total": 60})), 60);
        assert_eq!(decode_count(200, json!({})), 0);
        assert_eq!(decode_count(200, json!("garbage")), 0);
        assert_eq!(decode_count(404, json!({"total": 60})), 0);
        assert_eq!(decode_count(500, Value::Null), 0);
    }

    #[test]
    fn test_decode_cards_statuses() {
        let body = json!([{"id": 3, "title": "t", "deck": 7}]);
        match decode_cards("/decks/7/cards", 200, body).unwrap() {
            CardsFetch::Page(cards) => assert_eq!(cards.len(), 1),
            other => panic!("expected page, got {other:?}"),
        }

        assert_eq!(
            decode_cards("/decks/7/cards", 400, Value::Null).unwrap(),
            CardsFetch::OutOfRange
        );
        assert_eq!(
            decode_cards("/decks/7/cards", 404, Value::Null).unwrap(),
            CardsFetch::Missing
        );
        assert!(decode_cards("/decks/7/cards", 503, Value::Null).is_err());
    }
}
