// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Response Cache
//!
//! Two tiers, looked up in order:
//!
//! - **memory**: bounded LRU of type-erased envelopes, shorter default TTL
//! - **disk**: redb-backed store under a reserved namespace, longer default TTL
//!
//! Writes go to both tiers. Bulk invalidation uses colon-delimited wildcard
//! patterns (see [`pattern`]). The cache never fails a caller: decode and
//! persistence errors degrade to a miss or a no-op.

pub mod disk;
pub mod entry;
pub mod keys;
pub mod manager;
pub mod pattern;
pub mod stats;
pub mod ttl;

pub use disk::{DiskCache, DEFAULT_NAMESPACE};
pub use entry::{CacheEntry, CacheEnvelope};
pub use keys::CacheKey;
pub use manager::{CacheConfig, CacheManager, DEFAULT_MAX_MEMORY_ENTRIES};
pub use pattern::KeyPattern;
pub use stats::CacheStats;
pub use ttl::CacheTtl;
