//! Hash-based locations: parsed path segments plus query pairs.

use std::fmt;

/// A parsed navigation target.
///
/// Accepts raw hash fragments (`#!/deck/1`, `#/deck/1`) as well as plain
/// paths (`/deck/1`); parsing never fails — an empty input is the root
/// location `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse a raw navigation target.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let raw = raw.strip_prefix('!').unwrap_or(raw);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };

        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Self { segments, query }
    }

    /// The path segments, root being the empty slice.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Look up a query parameter. The first occurrence wins.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The path without the query string.
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let loc = Location::parse("/deck/7/foo");
        assert_eq!(loc.segments(), ["deck", "7", "foo"]);
        assert_eq!(loc.path(), "/deck/7/foo");
    }

    #[test]
    fn test_parse_hash_prefixes() {
        assert_eq!(Location::parse("#!/deck/7"), Location::parse("/deck/7"));
        assert_eq!(Location::parse("#/deck/7"), Location::parse("/deck/7"));
    }

    #[test]
    fn test_parse_root() {
        let loc = Location::parse("/");
        assert!(loc.segments().is_empty());
        assert_eq!(loc.path(), "/");
        assert_eq!(Location::parse(""), loc);
    }

    #[test]
    fn test_parse_query() {
        let loc = Location::parse("/deck/7/foo/cards?page=9&sort=title&order=desc");
        assert_eq!(loc.query("page"), Some("9"));
        assert_eq!(loc.query("sort"), Some("title"));
        assert_eq!(loc.query("order"), Some("desc"));
        assert_eq!(loc.query("absent"), None);
    }

    #[test]
    fn test_parse_query_edge_shapes() {
        let loc = Location::parse("/x?flag&empty=&page=1&page=2");
        assert_eq!(loc.query("flag"), Some(""));
        assert_eq!(loc.query("empty"), Some(""));
        // first occurrence wins
        assert_eq!(loc.query("page"), Some("1"));
    }

    #[test]
    fn test_display_roundtrip() {
        let raw = "/deck/7/foo/cards?page=2&sort=title";
        assert_eq!(Location::parse(raw).to_string(), raw);
        assert_eq!(Location::parse("/").to_string(), "/");
    }
}
