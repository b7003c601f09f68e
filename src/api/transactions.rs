// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Write operations and transaction status.
//!
//! Every write goes through the [`TransactionPipeline`](crate::blockchain::TransactionPipeline):
//! the API prepares the transaction, the client signs it with the wallet's
//! stored key and broadcasts it, then the wallet's cached balances are dropped.

use crate::blockchain::BroadcastResult;
use crate::client::FxClient;
use crate::error::ClientResult;
use crate::models::{
    ApproveRequest, GaugeClaimRequest, GaugeStakeRequest, MintRequest, PoolDepositRequest,
    PoolWithdrawRequest, RedeemRequest, TransactionStatus, TransferRequest,
};
use crate::transport::TransportExt;
use crate::validation::validate_tx_hash;

impl FxClient {
    /// Current status of a submitted transaction. Never cached.
    pub async fn transaction_status(&self, hash: &str) -> ClientResult<TransactionStatus> {
        validate_tx_hash(hash)?;
        self.transport
            .get_json(&format!("/v1/transactions/{hash}"))
            .await
    }

    pub async fn transfer(&self, request: &TransferRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn approve(&self, request: &ApproveRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn mint(&self, request: &MintRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn redeem(&self, request: &RedeemRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn deposit_to_pool(&self, request: &PoolDepositRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn withdraw_from_pool(
        &self,
        request: &PoolWithdrawRequest,
    ) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn stake_in_gauge(&self, request: &GaugeStakeRequest) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }

    pub async fn claim_gauge_rewards(
        &self,
        request: &GaugeClaimRequest,
    ) -> ClientResult<BroadcastResult> {
        self.pipeline.execute(request).await
    }
}
