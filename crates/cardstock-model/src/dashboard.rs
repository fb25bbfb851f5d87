//! Dashboard constants: route handler, panes, cards paging and sorting.

use serde::{Deserialize, Serialize};

/// Cards fetched per page.
pub const CARDS_PER_PAGE: u64 = 25;

/// The component a completed route resolves to, stored at `route.handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteHandler {
    /// The deck/card dashboard.
    Dashboard,
}

/// Which dashboard pane is active, stored at `dashboard.view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    /// Child-deck listing.
    Decks,
    /// Cards listing / card profile.
    Cards,
}

/// Server-side sort key for the cards listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardsSort {
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Card title.
    Title,
    /// Last review time.
    ReviewedAt,
    /// Number of reviews.
    TimesReviewed,
}

impl CardsSort {
    /// Query-string value for this sort key.
    pub fn as_str(self) -> &'static str {
        match self {
            CardsSort::CreatedAt => "created_at",
            CardsSort::UpdatedAt => "updated_at",
            CardsSort::Title => "title",
            CardsSort::ReviewedAt => "reviewed_at",
            CardsSort::TimesReviewed => "times_reviewed",
        }
    }

    /// Parse a query-string value. Unknown values are dropped, not errors.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(CardsSort::CreatedAt),
            "updated_at" => Some(CardsSort::UpdatedAt),
            "title" => Some(CardsSort::Title),
            "reviewed_at" => Some(CardsSort::ReviewedAt),
            "times_reviewed" => Some(CardsSort::TimesReviewed),
            _ => None,
        }
    }
}

/// Sort direction for the cards listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Query-string value for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parse a query-string value. Unknown values are dropped, not errors.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_handler_serialization() {
        assert_eq!(serde_json::to_value(RouteHandler::Dashboard).unwrap(), json!("dashboard"));
    }

    #[test]
    fn test_dashboard_view_serialization() {
        assert_eq!(serde_json::to_value(DashboardView::Decks).unwrap(), json!("decks"));
        assert_eq!(serde_json::to_value(DashboardView::Cards).unwrap(), json!("cards"));
    }

    #[test]
    fn test_sort_roundtrip() {
        for sort in [
            CardsSort::CreatedAt,
            CardsSort::UpdatedAt,
            CardsSort::Title,
            CardsSort::ReviewedAt,
            CardsSort::TimesReviewed,
        ] {
            assert_eq!(CardsSort::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(CardsSort::parse("nope"), None);
    }

    #[test]
    fn test_order_roundtrip() {
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("DESC"), None);
    }
}
