// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet balance queries.

use crate::cache::{CacheKey, CacheTtl};
use crate::client::FxClient;
use crate::error::ClientResult;
use crate::models::{TokenBalance, WalletBalances};
use crate::validation::{validate_address, validate_addresses};

impl FxClient {
    /// Every tracked balance of `address`.
    pub async fn balances(&self, address: &str) -> ClientResult<WalletBalances> {
        validate_address(address)?;
        self.cached_get(
            &CacheKey::balances(address),
            CacheTtl::BALANCE,
            &format!("/v1/balances/{address}"),
        )
        .await
    }

    /// Balance of one token held by `address`.
    pub async fn token_balance(&self, address: &str, token: &str) -> ClientResult<TokenBalance> {
        validate_addresses([address, token])?;
        self.cached_get(
            &CacheKey::token_balance(address, token),
            CacheTtl::BALANCE,
            &format!("/v1/balances/{address}/{token}"),
        )
        .await
    }
}
