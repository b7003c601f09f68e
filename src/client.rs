// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client facade tying configuration, transport, cache, key store, and signer
//! together. The typed endpoints live in [`crate::api`] as `impl FxClient`
//! blocks.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::blockchain::{LocalSigner, TransactionPipeline, TransactionSigner};
use crate::cache::{CacheManager, CacheStats, DiskCache};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::storage::keystore::{FileKeyStore, SecureKeyStore};
use crate::transport::{HttpTransport, Transport, TransportExt};

/// f(x) protocol API client.
#[derive(Clone)]
pub struct FxClient {
    config: Arc<ClientConfig>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) cache: Arc<CacheManager>,
    pub(crate) keystore: Arc<dyn SecureKeyStore>,
    pub(crate) pipeline: TransactionPipeline,
}

impl FxClient {
    /// Client with the default collaborators for `config`.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        FxClientBuilder::new(config).build()
    }

    /// Client configured from the environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn builder(config: ClientConfig) -> FxClientBuilder {
        FxClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Empty both cache tiers and reset the counters.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Read-through `GET`: serve `key` from cache, else fetch `path` and fill.
    pub(crate) async fn cached_get<T>(&self, key: &str, ttl: Duration, path: &str) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned + Send,
    {
        self.cache
            .get_or_fetch(key, Some(ttl), || self.transport.get_json::<T>(path))
            .await
    }
}

/// Builder for [`FxClient`]; every collaborator defaults from the config.
pub struct FxClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<CacheManager>>,
    keystore: Option<Arc<dyn SecureKeyStore>>,
    signer: Option<Arc<dyn TransactionSigner>>,
}

impl FxClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            cache: None,
            keystore: None,
            signer: None,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn cache(mut self, cache: Arc<CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn keystore(mut self, keystore: Arc<dyn SecureKeyStore>) -> Self {
        self.keystore = Some(keystore);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> ClientResult<FxClient> {
        let config = self.config;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        let cache = match self.cache {
            Some(cache) => cache,
            None => Arc::new(CacheManager::new(open_disk_tier(&config), config.cache.clone())),
        };
        let keystore = self
            .keystore
            .unwrap_or_else(|| Arc::new(FileKeyStore::new(config.keys_dir())));
        let signer = self.signer.unwrap_or_else(|| Arc::new(LocalSigner::new()));

        let pipeline = TransactionPipeline::new(
            Arc::clone(&transport),
            signer,
            Arc::clone(&keystore),
            Arc::clone(&cache),
        );

        tracing::info!(
            base_url = %config.base_url,
            data_dir = %config.data_dir.display(),
            "f(x) client ready"
        );

        Ok(FxClient {
            config: Arc::new(config),
            transport,
            cache,
            keystore,
            pipeline,
        })
    }
}

/// Open the redb tier, degrading to a volatile tier if the file is unusable.
fn open_disk_tier(config: &ClientConfig) -> DiskCache {
    let path = config.cache_db_path();
    match DiskCache::open(&path, config.cache.namespace.clone()) {
        Ok(disk) => disk,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Persistent cache unavailable, using memory only"
            );
            DiskCache::in_memory(config.cache.namespace.clone())
        }
    }
}
