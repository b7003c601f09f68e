// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hit/miss counters.

use serde::Serialize;

/// Process-lifetime cache counters. Reset only by `CacheManager::clear`.
///
/// Values handed to callers are snapshots; they never change after the fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Total lookups recorded.
    pub fn total(&self) -> u64 {
        self.memory_hits + self.disk_hits + self.misses
    }

    /// Hits from either tier.
    pub fn hits(&self) -> u64 {
        self.memory_hits + self.disk_hits
    }

    /// Fraction of lookups served from cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits() as f64 / total as f64,
        }
    }
}
