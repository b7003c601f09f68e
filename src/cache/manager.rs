// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Two-tier cache: a bounded in-process LRU in front of the persistent tier.
//!
//! ## Lookup order
//!
//! 1. Memory: a live entry is a memory hit; an expired one is dropped.
//! 2. Disk: a live entry is a disk hit and is promoted into memory; an expired
//!    one is dropped.
//! 3. Otherwise a miss.
//!
//! Values that fail to decode into the requested type read as absence.
//!
//! ## Eviction
//!
//! After an insert pushes the memory tier past `max_memory_entries`, expired
//! entries go first, then the entries with the earliest `created_at`. A disk
//! entry promoted into memory keeps its original creation time, so it can be
//! the next one out. Ties fall back to insertion order.
//!
//! ## Locking
//!
//! The memory map and statistics share one `std::sync::Mutex`, never held
//! across an `.await`. The disk tier serializes its own operations; a
//! promotion is not atomic with the disk read that produced it.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{de::DeserializeOwned, Serialize};

use super::disk::{DiskCache, DEFAULT_NAMESPACE};
use super::entry::CacheEnvelope;
use super::pattern::KeyPattern;
use super::stats::CacheStats;
use super::ttl::CacheTtl;
use crate::error::ClientResult;

/// Default memory tier capacity.
pub const DEFAULT_MAX_MEMORY_ENTRIES: usize = 100;

/// Cache tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Memory tier capacity
    pub max_memory_entries: usize,
    /// Memory TTL when a write does not specify one
    pub memory_ttl: Duration,
    /// Disk TTL when a write does not specify one
    pub disk_ttl: Duration,
    /// Key namespace reserved in the persistent store
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_memory_entries: DEFAULT_MAX_MEMORY_ENTRIES,
            memory_ttl: CacheTtl::MEMORY_DEFAULT,
            disk_ttl: CacheTtl::DISK_DEFAULT,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Memory map and counters, guarded together.
struct MemoryTier {
    entries: LruCache<String, CacheEnvelope>,
    stats: CacheStats,
}

enum MemoryLookup<V> {
    Hit(V),
    Absent,
}

/// Two-tier response cache.
pub struct CacheManager {
    memory: Mutex<MemoryTier>,
    disk: DiskCache,
    config: CacheConfig,
}

impl CacheManager {
    pub fn new(disk: DiskCache, config: CacheConfig) -> Self {
        Self {
            memory: Mutex::new(MemoryTier {
                entries: LruCache::unbounded(),
                stats: CacheStats::default(),
            }),
            disk,
            config,
        }
    }

    /// Cache with a volatile disk tier.
    pub fn in_memory(config: CacheConfig) -> Self {
        let disk = DiskCache::in_memory(config.namespace.clone());
        Self::new(disk, config)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The persistent tier, for direct inspection.
    pub fn disk(&self) -> &DiskCache {
        &self.disk
    }

    fn lock(&self) -> MutexGuard<'_, MemoryTier> {
        // A poisoned lock only means another caller panicked mid-update; the
        // map itself is still structurally valid.
        self.memory.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Look up `key`, decoding into `V`.
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let now = Utc::now();

        if let MemoryLookup::Hit(value) = self.lookup_memory(key, now) {
            return Some(value);
        }

        if let Some(envelope) = self.disk.get(key).await {
            if envelope.is_expired_at(now) {
                tracing::trace!(key, "Disk cache entry expired");
                self.disk.remove(key).await;
            } else if let Some(value) = envelope.decode::<V>() {
                let mut memory = self.lock();
                memory.stats.disk_hits += 1;
                self.insert_memory(&mut memory, envelope, now);
                return Some(value);
            }
        }

        self.lock().stats.misses += 1;
        None
    }

    fn lookup_memory<V: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> MemoryLookup<V> {
        let mut memory = self.lock();

        let Some(envelope) = memory.entries.peek(key) else {
            return MemoryLookup::Absent;
        };

        if envelope.is_expired_at(now) {
            memory.entries.pop(key);
            return MemoryLookup::Absent;
        }

        match envelope.decode::<V>() {
            Some(value) => {
                memory.stats.memory_hits += 1;
                MemoryLookup::Hit(value)
            }
            None => MemoryLookup::Absent,
        }
    }

    /// `true` if `key` is resident in the memory tier (expired or not).
    pub fn contains_in_memory(&self, key: &str) -> bool {
        self.lock().entries.contains(key)
    }

    /// Number of entries resident in the memory tier.
    pub fn memory_len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Point-in-time copy of the counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Store `value` in both tiers.
    ///
    /// With `ttl` unset, each tier uses its own default. Never fails: an
    /// unserializable value or a persistence error is logged and dropped.
    pub async fn set<V: Serialize + ?Sized>(&self, value: &V, key: &str, ttl: Option<Duration>) {
        let memory_ttl = ttl.unwrap_or(self.config.memory_ttl);
        let disk_ttl = ttl.unwrap_or(self.config.disk_ttl);

        let envelope = match CacheEnvelope::encode(key, value, memory_ttl) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(key, error = %e, "Value not cacheable");
                return;
            }
        };
        let disk_envelope = envelope.with_ttl(disk_ttl);

        {
            let mut memory = self.lock();
            self.insert_memory(&mut memory, envelope, Utc::now());
        }
        self.disk.set(key, &disk_envelope).await;
    }

    /// Remove `key` from both tiers. No-op if absent.
    pub async fn remove(&self, key: &str) {
        self.lock().entries.pop(key);
        self.disk.remove(key).await;
    }

    /// Empty both tiers and reset the counters.
    pub async fn clear(&self) {
        {
            let mut memory = self.lock();
            memory.entries.clear();
            memory.stats = CacheStats::default();
        }
        self.disk.clear().await;
    }

    /// Remove every key matching `pattern` from both tiers.
    ///
    /// Matches keys resident in memory and keys stored on disk, so entries
    /// evicted from memory are still invalidated. Returns the number of
    /// distinct keys removed.
    pub async fn invalidate(&self, pattern: &str) -> usize {
        let pattern = KeyPattern::new(pattern);

        let mut matched: BTreeSet<String> = {
            let mut memory = self.lock();
            let keys: Vec<String> = memory
                .entries
                .iter()
                .map(|(k, _)| k)
                .filter(|k| pattern.matches(k))
                .cloned()
                .collect();
            for key in &keys {
                memory.entries.pop(key);
            }
            keys.into_iter().collect()
        };

        matched.extend(
            self.disk
                .keys()
                .await
                .into_iter()
                .filter(|k| pattern.matches(k)),
        );

        let removed = matched.len();
        self.disk.remove_many(matched.into_iter().collect()).await;

        tracing::debug!(%pattern, removed, "Invalidated cache entries");
        removed
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Errors from `fetch` propagate unchanged and are not cached.
    pub async fn get_or_fetch<V, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> ClientResult<V>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<V>>,
    {
        if let Some(value) = self.get::<V>(key).await {
            return Ok(value);
        }
        let value = fetch().await?;
        self.set(&value, key, ttl).await;
        Ok(value)
    }

    // =========================================================================
    // Eviction
    // =========================================================================

    fn insert_memory(&self, memory: &mut MemoryTier, envelope: CacheEnvelope, now: DateTime<Utc>) {
        memory.entries.put(envelope.key.clone(), envelope);

        let max = self.config.max_memory_entries;
        if memory.entries.len() <= max {
            return;
        }

        let expired: Vec<String> = memory
            .entries
            .iter()
            .filter(|(_, e)| e.is_expired_at(now))
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            memory.entries.pop(key);
        }

        let mut evicted = 0usize;
        while memory.entries.len() > max {
            // `iter()` runs newest first; reversed, `min_by_key` keeps the
            // earliest insertion among equal creation times.
            let Some(oldest) = memory
                .entries
                .iter()
                .rev()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            memory.entries.pop(&oldest);
            evicted += 1;
        }

        tracing::trace!(expired = expired.len(), evicted, "Evicted memory cache entries");
    }
}
