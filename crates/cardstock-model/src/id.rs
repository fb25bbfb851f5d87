//! Entity identifiers and route-segment parsing.

/// Identifier of a deck. Always positive.
pub type DeckId = u64;

/// Identifier of a card. Always positive.
pub type CardId = u64;

/// Identifier of a stash. Always positive.
pub type StashId = u64;

/// Parse a route segment as a positive integer id.
///
/// Strictly decimal digits; anything else — signs, whitespace, zero,
/// overflow — yields `None`. Guards treat `None` as "go to the default
/// route" without issuing any REST call.
pub fn parse_id(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = segment.parse::<u64>().ok()?;
    (id > 0).then_some(id)
}
