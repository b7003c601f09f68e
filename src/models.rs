// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes of the f(x) protocol REST API. Field names are
//! camelCase on the wire. Amounts stay strings: token quantities routinely
//! exceed `u64` and the client never does arithmetic on them.
//!
//! ## Model Categories
//!
//! - **Balances**: per-wallet token balances
//! - **Protocol**: NAV and aggregate stats
//! - **Pools / Markets / Gauges**: listing and detail views
//! - **Transactions**: status lookups and the bodies of prepare calls

use serde::{Deserialize, Serialize};

use crate::blockchain::PrepareRequest;

// =============================================================================
// Balances
// =============================================================================

/// Balance of one token held by a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_address: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    /// Raw balance in the token's smallest unit.
    pub balance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_formatted: Option<String>,
}

/// Every tracked balance of a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalances {
    pub address: String,
    #[serde(default)]
    pub balances: Vec<TokenBalance>,
}

// =============================================================================
// Protocol
// =============================================================================

/// Net asset value of one protocol token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenNav {
    pub symbol: String,
    #[serde(default)]
    pub address: Option<String>,
    pub nav: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolNav {
    pub tokens: Vec<TokenNav>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolStats {
    pub total_value_locked: Option<String>,
    pub fxusd_supply: Option<String>,
    pub collateral_ratio: Option<String>,
    pub stability_pool_apy: Option<String>,
    pub updated_at: Option<String>,
}

// =============================================================================
// Pools, Markets, Gauges
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfo {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub asset_token: Option<String>,
    #[serde(default)]
    pub total_deposits: Option<String>,
    #[serde(default)]
    pub apy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_token: Option<String>,
    #[serde(default)]
    pub fractional_token: Option<String>,
    #[serde(default)]
    pub leveraged_token: Option<String>,
    #[serde(default)]
    pub collateral_ratio: Option<String>,
    #[serde(default)]
    pub mint_paused: bool,
    #[serde(default)]
    pub redeem_paused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeInfo {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub staking_token: Option<String>,
    #[serde(default)]
    pub apy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewardAmount {
    pub token_address: String,
    #[serde(default)]
    pub symbol: String,
    pub amount: String,
}

/// Claimable rewards of one wallet in one gauge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeRewards {
    pub gauge_address: String,
    pub wallet_address: String,
    #[serde(default)]
    pub rewards: Vec<RewardAmount>,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub transaction_hash: String,
    /// e.g. `pending`, `confirmed`, `failed`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
}

/// ERC-20 transfer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub wallet_address: String,
    pub token_address: String,
    pub to: String,
    pub amount: String,
}

/// ERC-20 allowance for `spender`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    pub wallet_address: String,
    pub token_address: String,
    pub spender: String,
    pub amount: String,
}

/// Mint protocol tokens against a market's base token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub wallet_address: String,
    pub market_address: String,
    pub amount: String,
    /// Slippage floor on the minted amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount_out: Option<String>,
}

/// Redeem protocol tokens for a market's base token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub wallet_address: String,
    pub market_address: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount_out: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolDepositRequest {
    pub wallet_address: String,
    pub pool_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolWithdrawRequest {
    pub wallet_address: String,
    pub pool_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeStakeRequest {
    pub wallet_address: String,
    pub gauge_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GaugeClaimRequest {
    pub wallet_address: String,
    pub gauge_address: String,
}

impl PrepareRequest for TransferRequest {
    const OPERATION: &'static str = "transfer";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.token_address, &*self.to]
    }
}

impl PrepareRequest for ApproveRequest {
    const OPERATION: &'static str = "approve";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.token_address, &*self.spender]
    }
}

impl PrepareRequest for MintRequest {
    const OPERATION: &'static str = "mint";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.market_address]
    }
}

impl PrepareRequest for RedeemRequest {
    const OPERATION: &'static str = "redeem";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.market_address]
    }
}

impl PrepareRequest for PoolDepositRequest {
    const OPERATION: &'static str = "pool-deposit";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.pool_address]
    }
}

impl PrepareRequest for PoolWithdrawRequest {
    const OPERATION: &'static str = "pool-withdraw";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.pool_address]
    }
}

impl PrepareRequest for GaugeStakeRequest {
    const OPERATION: &'static str = "gauge-stake";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.gauge_address]
    }
}

impl PrepareRequest for GaugeClaimRequest {
    const OPERATION: &'static str = "gauge-claim";

    fn wallet(&self) -> &str {
        &self.wallet_address
    }

    fn addresses(&self) -> Vec<&str> {
        vec![&*self.wallet_address, &*self.gauge_address]
    }
}
