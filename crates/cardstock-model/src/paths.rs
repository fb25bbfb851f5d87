//! Canonical state-tree paths shared across the cardstock crates.
//!
//! Every read and write against the tree goes through this registry.

use cardstock_state::{path, Path};

/// Component currently routed to (`RouteHandler`).
pub fn route_handler() -> Path {
    path!("route", "handler")
}

/// Id of the application's root deck.
pub fn root() -> Path {
    path!("root")
}

/// The currently viewed deck (`Deck`).
pub fn deck_self() -> Path {
    path!("deck", "self")
}

/// Fully loaded child decks of the current deck (`Vec<Deck>`).
pub fn deck_children() -> Path {
    path!("deck", "children")
}

/// Ancestor chain plus current deck (`Breadcrumb`).
pub fn deck_breadcrumb() -> Path {
    path!("deck", "breadcrumb")
}

/// The currently viewed card (`Card`).
pub fn card_self() -> Path {
    path!("card", "self")
}

/// The currently viewed stash (`Stash`).
pub fn stash_self() -> Path {
    path!("stash", "self")
}

/// Which dashboard pane is shown (`DashboardView`).
pub fn dashboard_view() -> Path {
    path!("dashboard", "view")
}

/// Whether the current deck's settings are being edited.
pub fn decks_editing() -> Path {
    path!("dashboard", "decks", "editing")
}

/// Whether a new deck is being created.
pub fn decks_creating_new() -> Path {
    path!("dashboard", "decks", "creatingNew")
}

/// Transient edit-completion payload; reset to the sentinel per navigation.
pub fn decks_finish_editing() -> Path {
    path!("dashboard", "decks", "finishEditing")
}

/// Whether a new card is being created.
pub fn cards_creating_new() -> Path {
    path!("dashboard", "cards", "creatingNew")
}

/// Current 1-based cards page.
pub fn cards_page() -> Path {
    path!("dashboard", "cards", "page")
}

/// Whether a single card profile is being viewed.
pub fn cards_viewing_profile() -> Path {
    path!("dashboard", "cards", "viewingProfile")
}

/// Total card count for the current deck.
pub fn cards_total() -> Path {
    path!("dashboard", "cards", "total")
}

/// Derived page count (`ceil(total / CARDS_PER_PAGE)`).
pub fn cards_num_of_pages() -> Path {
    path!("dashboard", "cards", "numOfPages")
}

/// The current page of cards (`Vec<Card>`).
pub fn cards_list() -> Path {
    path!("dashboard", "cards", "list")
}
