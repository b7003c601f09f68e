// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transaction Pipeline
//!
//! Every write operation runs the same strictly sequential stages:
//!
//! ```text
//! Validate -> FetchKey -> Prepare -> Sign -> Broadcast -> Invalidate -> Done
//! ```
//!
//! FetchKey only checks that a key is stored. The key itself is read right
//! before signing and dropped as soon as the signer returns, so no decrypted
//! key is held across a network call.
//!
//! Any stage may fail, which ends the run with that stage's error. Nothing is
//! retried: a broadcast whose response is lost may still have reached the
//! network, so the error goes to the caller instead of a second submission.
//!
//! Concurrent runs for the same wallet are not coordinated; nonce assignment
//! is left to the remote API.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use super::signing::TransactionSigner;
use super::types::{BroadcastRequest, BroadcastResult, UnsignedTransaction, BROADCAST_PATH};
use crate::cache::{CacheKey, CacheManager};
use crate::error::{ClientError, ClientResult};
use crate::storage::keystore::SecureKeyStore;
use crate::transport::{Transport, TransportExt};
use crate::validation::validate_addresses;

/// Prefix shared by all prepare endpoints.
pub const PREPARE_PATH_PREFIX: &str = "/v1/transactions/prepare";

/// A write operation the API can prepare.
///
/// The request itself is the prepare call's JSON body.
pub trait PrepareRequest: Serialize + Send + Sync {
    /// Endpoint name under [`PREPARE_PATH_PREFIX`].
    const OPERATION: &'static str;

    /// The acting wallet, whose key signs the transaction.
    fn wallet(&self) -> &str;

    /// Every address-shaped field, including the wallet.
    fn addresses(&self) -> Vec<&str>;

    fn prepare_path() -> String {
        format!("{PREPARE_PATH_PREFIX}/{}", Self::OPERATION)
    }
}

/// Pipeline position, recorded on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validate,
    FetchKey,
    Prepare,
    Sign,
    Broadcast,
    Invalidate,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Validate => "validate",
            PipelineStage::FetchKey => "fetch_key",
            PipelineStage::Prepare => "prepare",
            PipelineStage::Sign => "sign",
            PipelineStage::Broadcast => "broadcast",
            PipelineStage::Invalidate => "invalidate",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Prepare, sign, and broadcast write operations.
#[derive(Clone)]
pub struct TransactionPipeline {
    transport: Arc<dyn Transport>,
    signer: Arc<dyn TransactionSigner>,
    keystore: Arc<dyn SecureKeyStore>,
    cache: Arc<CacheManager>,
}

impl TransactionPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        signer: Arc<dyn TransactionSigner>,
        keystore: Arc<dyn SecureKeyStore>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            transport,
            signer,
            keystore,
            cache,
        }
    }

    /// Run one write operation end to end.
    pub async fn execute<R: PrepareRequest>(&self, request: &R) -> ClientResult<BroadcastResult> {
        let span = tracing::info_span!(
            "transaction",
            operation = R::OPERATION,
            wallet = %request.wallet(),
        );

        async {
            let mut stage = PipelineStage::Validate;
            let result = self.run(request, &mut stage).await;
            if let Err(e) = &result {
                tracing::warn!(%stage, error = %e, "Transaction pipeline failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run<R: PrepareRequest>(
        &self,
        request: &R,
        stage: &mut PipelineStage,
    ) -> ClientResult<BroadcastResult> {
        validate_addresses(request.addresses())?;
        let wallet = request.wallet();

        *stage = PipelineStage::FetchKey;
        if !self.keystore.exists(wallet)? {
            return Err(ClientError::WalletNotFound);
        }

        *stage = PipelineStage::Prepare;
        let unsigned: UnsignedTransaction =
            self.transport.post_json(&R::prepare_path(), request).await?;
        tracing::debug!(
            nonce = %unsigned.nonce,
            chain_id = %unsigned.chain_id,
            estimated_gas = unsigned.estimated_gas.as_deref(),
            "Prepared transaction"
        );

        *stage = PipelineStage::Sign;
        let signed = {
            // The key may have been removed while the prepare call was in flight.
            let key = self
                .keystore
                .fetch(wallet)?
                .ok_or(ClientError::WalletNotFound)?;
            self.signer.sign(&unsigned, &key)?
        };

        *stage = PipelineStage::Broadcast;
        let result: BroadcastResult = self
            .transport
            .post_json(
                BROADCAST_PATH,
                &BroadcastRequest {
                    signed_transaction: signed,
                },
            )
            .await?;
        if !result.success {
            return Err(ClientError::TransactionFailed(Some(result.status)));
        }

        *stage = PipelineStage::Invalidate;
        let removed = self.cache.invalidate(&CacheKey::balance_pattern(wallet)).await;
        tracing::debug!(removed, "Invalidated balance cache");

        *stage = PipelineStage::Done;
        tracing::info!(
            tx_hash = %result.transaction_hash,
            status = %result.status,
            "Transaction broadcast"
        );
        Ok(result)
    }
}
