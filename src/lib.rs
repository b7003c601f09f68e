// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! f(x) Protocol Client - typed REST client with local signing and caching
//!
//! Reads go through a two-tier response cache (memory + redb). Writes are
//! prepared by the API, signed locally with a key from the secure key store,
//! broadcast, and followed by invalidation of the wallet's cached balances.
//!
//! ## Modules
//!
//! - `api` - Typed endpoints on [`FxClient`]
//! - `blockchain` - Prepared transaction types, signing, and the write pipeline
//! - `cache` - Memory and disk tiers, TTLs, pattern invalidation, stats
//! - `storage` - Key-value stores and the private key store
//! - `transport` - JSON over HTTP with status-to-error mapping
//!
//! ```rust,ignore
//! let client = fx_client::FxClient::from_env()?;
//! let nav = client.protocol_nav().await?;
//! ```

pub mod api;
pub mod blockchain;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod transport;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{FxClient, FxClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorCategory};
