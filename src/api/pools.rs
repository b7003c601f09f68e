// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stability pools, markets, and gauges.

use crate::cache::{CacheKey, CacheTtl};
use crate::client::FxClient;
use crate::error::ClientResult;
use crate::models::{GaugeInfo, GaugeRewards, MarketInfo, PoolInfo};
use crate::validation::{validate_address, validate_addresses};

impl FxClient {
    pub async fn pools(&self) -> ClientResult<Vec<PoolInfo>> {
        self.cached_get(&CacheKey::pools(), CacheTtl::MARKET, "/v1/pools")
            .await
    }

    pub async fn pool(&self, address: &str) -> ClientResult<PoolInfo> {
        validate_address(address)?;
        self.cached_get(
            &CacheKey::pool(address),
            CacheTtl::MARKET,
            &format!("/v1/pools/{address}"),
        )
        .await
    }

    pub async fn markets(&self) -> ClientResult<Vec<MarketInfo>> {
        self.cached_get(&CacheKey::markets(), CacheTtl::MARKET, "/v1/markets")
            .await
    }

    pub async fn market(&self, address: &str) -> ClientResult<MarketInfo> {
        validate_address(address)?;
        self.cached_get(
            &CacheKey::market(address),
            CacheTtl::MARKET,
            &format!("/v1/markets/{address}"),
        )
        .await
    }

    /// Gauge list; changes rarely, so it is held for [`CacheTtl::STATIC`].
    pub async fn gauges(&self) -> ClientResult<Vec<GaugeInfo>> {
        self.cached_get(&CacheKey::gauges(), CacheTtl::STATIC, "/v1/gauges")
            .await
    }

    /// Claimable rewards of `wallet` in `gauge`.
    pub async fn gauge_rewards(&self, gauge: &str, wallet: &str) -> ClientResult<GaugeRewards> {
        validate_addresses([gauge, wallet])?;
        self.cached_get(
            &CacheKey::gauge_rewards(gauge, wallet),
            CacheTtl::BALANCE,
            &format!("/v1/gauges/{gauge}/rewards/{wallet}"),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use crate::error::ClientError;
    use crate::testing::{CountingKeyStore, StubTransport, OTHER, WALLET};
    use serde_json::json;

    #[tokio::test]
    async fn listings_and_details_use_separate_keys() {
        let stub = StubTransport::new();
        stub.respond("/v1/pools", Ok(json!([{"address": OTHER, "name": "fxUSD Stability Pool"}])));
        stub.respond(&format!("/v1/pools/{OTHER}"), Ok(json!({"address": OTHER, "apy": "7.5"})));
        let t = test_client(stub, CountingKeyStore::default());

        assert_eq!(t.client.pools().await.unwrap().len(), 1);
        assert_eq!(t.client.pool(OTHER).await.unwrap().apy.as_deref(), Some("7.5"));
        t.client.pools().await.unwrap();
        t.client.pool(OTHER).await.unwrap();
        assert_eq!(t.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn detail_lookups_validate_addresses() {
        let t = test_client(StubTransport::new(), CountingKeyStore::default());
        assert!(matches!(t.client.market("0x12").await, Err(ClientError::InvalidAddress(_))));
        assert!(matches!(
            t.client.gauge_rewards(OTHER, "me").await,
            Err(ClientError::InvalidAddress(_))
        ));
        assert_eq!(t.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn gauge_rewards_are_balance_scoped() {
        let stub = StubTransport::new();
        stub.respond(
            &format!("/v1/gauges/{OTHER}/rewards/{WALLET}"),
            Ok(json!({"gaugeAddress": OTHER, "walletAddress": WALLET, "rewards": [{"tokenAddress": OTHER, "amount": "12"}]})),
        );
        let t = test_client(stub, CountingKeyStore::default());

        let rewards = t.client.gauge_rewards(OTHER, WALLET).await.unwrap();
        assert_eq!(rewards.rewards[0].amount, "12");
        assert!(t
            .client
            .cache()
            .contains_in_memory(&format!("gauge:rewards:{}:{}", OTHER, WALLET.to_lowercase())));
    }
}
