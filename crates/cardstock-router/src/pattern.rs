//! Route patterns: literal and `:param` segments.

use crate::error::{RouteError, RouteResult};
use crate::Location;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSeg {
    Literal(&'static str),
    Param(&'static str),
}

/// A registered route shape, e.g. `/deck/:id/:slug/cards`.
///
/// Matching is purely structural: same segment count, literals equal,
/// `:param` segments captured verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pattern: &'static str,
    segs: Vec<PatternSeg>,
}

impl RoutePattern {
    /// Parse a pattern literal.
    pub fn parse(pattern: &'static str) -> Self {
        let segs = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => PatternSeg::Param(name),
                None => PatternSeg::Literal(seg),
            })
            .collect();
        Self { pattern, segs }
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &'static str {
        self.pattern
    }

    /// Match a location, capturing parameters.
    pub fn matches(&self, location: &Location) -> Option<RouteParams> {
        let segments = location.segments();
        if segments.len() != self.segs.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (pat, seg) in self.segs.iter().zip(segments) {
            match pat {
                PatternSeg::Literal(lit) => {
                    if *lit != seg.as_str() {
                        return None;
                    }
                }
                PatternSeg::Param(name) => {
                    params.insert(*name, seg.clone());
                }
            }
        }
        Some(RouteParams(params))
    }
}

/// Parameters captured from a matched location.
#[derive(Debug, Clone, Default)]
pub struct RouteParams(HashMap<&'static str, String>);

impl RouteParams {
    /// Look up a captured parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Look up a parameter the guard's wiring guarantees.
    ///
    /// Absence is a programmer-contract violation, not a user error.
    pub fn require(&self, name: &'static str) -> RouteResult<&str> {
        self.get(name).ok_or(RouteError::MissingParam { name })
    }
}
