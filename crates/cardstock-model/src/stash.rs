//! Stash snapshots: named collections of cards across decks.

use crate::StashId;
use serde::{Deserialize, Serialize};

/// A stash groups cards independently of the deck hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stash {
    /// Unique positive identifier.
    pub id: StashId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}
