// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Storage
//!
//! - [`kv`]: byte-oriented key-value stores backing the persistent cache tier
//! - [`keystore`]: private keys, one slot per wallet address
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   cache.redb        # persistent cache tier (namespace `fx.cache:`)
//!   keys/
//!     {address}.key   # private key, mode 0600
//! ```

pub mod keystore;
pub mod kv;

pub use keystore::{FileKeyStore, MemoryKeyStore, SecureKeyStore};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryStore, RedbStore};
