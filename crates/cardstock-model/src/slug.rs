//! Canonical URL slugs for decks and cards.

/// Map an entity name and id to its canonical URL slug.
///
/// Pure and deterministic: ASCII alphanumeric runs are lowercased and joined
/// by single dashes, everything else collapses into the separators. A name
/// with no usable characters falls back to the decimal id, so every entity
/// keeps a non-empty slug.
///
/// Mismatches between a URL's slug segment and the canonical slug of the
/// resolved entity redirect to the canonical URL — bookmarks survive renames.
pub fn slug(name: &str, id: u64) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        id.to_string()
    } else {
        out
    }
}
