// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wildcard key patterns for bulk invalidation.
//!
//! Patterns are colon-delimited like keys. `*` as the final segment matches one
//! or more remaining key segments; `*` anywhere else matches exactly one
//! segment. There is no other wildcard syntax.
//!
//! ```text
//! balance:*          matches balance:all:0xabc, balance:token:0xabc:fxusd
//! balance:*:0xabc    matches balance:all:0xabc only (exactly three segments)
//! ```

/// Segment separator for keys and patterns.
pub const SEPARATOR: char = ':';

/// Wildcard segment.
pub const WILDCARD: &str = "*";

/// A parsed invalidation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern {
    segments: Vec<String>,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            segments: pattern.split(SEPARATOR).map(str::to_string).collect(),
        }
    }

    /// `true` if the pattern contains no wildcard.
    pub fn is_exact(&self) -> bool {
        self.segments.iter().all(|s| s != WILDCARD)
    }

    pub fn matches(&self, key: &str) -> bool {
        let key_segments: Vec<&str> = key.split(SEPARATOR).collect();
        let pattern_len = self.segments.len();

        let trailing_wildcard = self.segments.last().is_some_and(|s| s == WILDCARD);
        if trailing_wildcard && key_segments.len() >= pattern_len {
            return self.segments[..pattern_len - 1]
                .iter()
                .zip(&key_segments)
                .all(|(p, k)| p == WILDCARD || p == k);
        }

        key_segments.len() == pattern_len
            && self
                .segments
                .iter()
                .zip(&key_segments)
                .all(|(p, k)| p == WILDCARD || p == k)
    }
}

impl std::fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_wildcard_swallows_suffix() {
        let p = KeyPattern::new("balance:*");
        assert!(p.matches("balance:all:0xabc"));
        assert!(p.matches("balance:token:0xabc:fxusd"));
        assert!(p.matches("balance:all"));
        assert!(!p.matches("balance"));
        assert!(!p.matches("protocol:nav"));
    }

    #[test]
    fn mid_wildcard_matches_one_segment() {
        let p = KeyPattern::new("balance:*:0xabc");
        assert!(p.matches("balance:all:0xabc"));
        assert!(p.matches("balance:fxusd:0xabc"));
        assert!(!p.matches("balance:all:0xdef"));
        assert!(!p.matches("balance:token:0xabc:fxusd"));
        assert!(!p.matches("balance:0xabc"));
    }

    #[test]
    fn mid_and_trailing_wildcards_combine() {
        let p = KeyPattern::new("gauge:*:0xabc:*");
        assert!(p.matches("gauge:rewards:0xabc:0xdef"));
        assert!(p.matches("gauge:rewards:0xabc:0xdef:extra"));
        assert!(!p.matches("gauge:rewards:0xfff:0xdef"));
        assert!(!p.matches("gauge:rewards:0xabc"));
    }

    #[test]
    fn exact_pattern_requires_equality() {
        let p = KeyPattern::new("protocol:nav");
        assert!(p.is_exact());
        assert!(p.matches("protocol:nav"));
        assert!(!p.matches("protocol:nav:extra"));
        assert!(!p.matches("protocol"));
    }
}
