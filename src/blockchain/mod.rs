// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Write-side plumbing: prepared transaction types, local signing, and the
//! prepare -> sign -> broadcast pipeline.

pub mod pipeline;
pub mod signing;
pub mod types;

pub use pipeline::{PipelineStage, PrepareRequest, TransactionPipeline, PREPARE_PATH_PREFIX};
pub use signing::{derive_address, LocalSigner, TransactionSigner};
pub use types::{BroadcastRequest, BroadcastResult, FeeMode, UnsignedTransaction, BROADCAST_PATH};
