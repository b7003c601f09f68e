// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cache key construction.
//!
//! Keys follow `category:subcategory:identifier`. Addresses are lowercased so
//! checksummed and plain spellings share one entry, and so the pipeline's
//! `balance:*:<address>` invalidation finds them.

/// Builders for every key the client writes.
pub struct CacheKey;

impl CacheKey {
    /// All balances of a wallet.
    pub fn balances(address: &str) -> String {
        format!("balance:all:{}", address.to_lowercase())
    }

    /// One token balance of a wallet.
    pub fn token_balance(address: &str, token: &str) -> String {
        format!("balance:{}:{}", token.to_lowercase(), address.to_lowercase())
    }

    /// Pattern matching every balance entry of a wallet.
    pub fn balance_pattern(address: &str) -> String {
        format!("balance:*:{}", address.to_lowercase())
    }

    pub fn protocol_nav() -> String {
        "protocol:nav".to_string()
    }

    pub fn protocol_stats() -> String {
        "protocol:stats".to_string()
    }

    pub fn pools() -> String {
        "pool:list".to_string()
    }

    pub fn pool(address: &str) -> String {
        format!("pool:detail:{}", address.to_lowercase())
    }

    pub fn markets() -> String {
        "market:list".to_string()
    }

    pub fn market(address: &str) -> String {
        format!("market:detail:{}", address.to_lowercase())
    }

    pub fn gauges() -> String {
        "gauge:list".to_string()
    }

    pub fn gauge_rewards(gauge: &str, wallet: &str) -> String {
        format!(
            "gauge:rewards:{}:{}",
            gauge.to_lowercase(),
            wallet.to_lowercase()
        )
    }
}
