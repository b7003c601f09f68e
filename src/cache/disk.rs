// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persistent cache tier.
//!
//! Entries are stored in a [`KeyValueStore`] under `<namespace>:<key>` as the
//! JSON form of [`CacheEntry`](super::CacheEntry). Every operation passes
//! through one async gate and runs on the blocking pool, so the store never
//! sees two cache operations at once.
//!
//! The tier is allowed to lose data but never to fail a caller: store errors
//! and undecodable bytes are logged and read as absence.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::entry::CacheEnvelope;
use crate::storage::kv::{KeyValueStore, KvResult, MemoryStore, RedbStore};

/// Namespace reserved for cache entries in the shared store.
pub const DEFAULT_NAMESPACE: &str = "fx.cache";

/// Persistent cache tier over a key-value store.
pub struct DiskCache {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    gate: Mutex<()>,
}

impl DiskCache {
    /// Wrap an existing store, keeping entries under `namespace`.
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            gate: Mutex::new(()),
        }
    }

    /// Open a redb-backed tier at `path`.
    pub fn open(path: &Path, namespace: impl Into<String>) -> KvResult<Self> {
        Ok(Self::new(Arc::new(RedbStore::open(path)?), namespace))
    }

    /// Volatile tier, for tests and cache-only sessions.
    pub fn in_memory(namespace: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryStore::new()), namespace)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn prefix(&self) -> String {
        format!("{}:", self.namespace)
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Read an entry. Missing, undecodable, and unreadable entries are `None`.
    pub async fn get(&self, key: &str) -> Option<CacheEnvelope> {
        let storage_key = self.storage_key(key);
        let bytes = self.run("get", move |store| store.get(&storage_key)).await??;

        match CacheEnvelope::from_persisted(&bytes) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::debug!(key, error = %e, "Discarding undecodable disk cache entry");
                None
            }
        }
    }

    /// Write an entry, replacing any previous one.
    pub async fn set(&self, key: &str, envelope: &CacheEnvelope) {
        let bytes = match envelope.to_persisted() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(key, error = %e, "Skipping disk cache write");
                return;
            }
        };
        let storage_key = self.storage_key(key);
        self.run("set", move |store| store.set(&storage_key, &bytes))
            .await;
    }

    /// Remove an entry. No-op if absent.
    pub async fn remove(&self, key: &str) {
        let storage_key = self.storage_key(key);
        self.run("remove", move |store| store.remove(&storage_key))
            .await;
    }

    /// Remove several entries in one pass.
    pub async fn remove_many(&self, keys: Vec<String>) {
        if keys.is_empty() {
            return;
        }
        let storage_keys: Vec<String> = keys.iter().map(|k| self.storage_key(k)).collect();
        self.run("remove_many", move |store| {
            storage_keys.iter().try_for_each(|k| store.remove(k))
        })
        .await;
    }

    /// Remove every entry under this tier's namespace and nothing else.
    pub async fn clear(&self) {
        let prefix = self.prefix();
        if let Some(removed) = self
            .run("clear", move |store| store.remove_prefix(&prefix))
            .await
        {
            tracing::debug!(namespace = %self.namespace, removed, "Cleared disk cache");
        }
    }

    /// Keys currently stored under the namespace, namespace stripped.
    pub async fn keys(&self) -> Vec<String> {
        let prefix = self.prefix();
        let strip = prefix.len();
        self.run("keys", move |store| store.keys_with_prefix(&prefix))
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|k| k[strip..].to_string())
            .collect()
    }

    /// Run a store operation under the gate on the blocking pool.
    async fn run<T, F>(&self, op: &'static str, f: F) -> Option<T>
    where
        F: FnOnce(&dyn KeyValueStore) -> KvResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.gate.lock().await;
        let store = Arc::clone(&self.store);

        match tokio::task::spawn_blocking(move || f(store.as_ref())).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::warn!(op, error = %e, "Disk cache operation failed");
                None
            }
            Err(e) => {
                tracing::warn!(op, error = %e, "Disk cache task failed");
                None
            }
        }
    }
}
