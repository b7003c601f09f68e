// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed endpoints of the f(x) protocol API, as `impl FxClient` blocks.
//!
//! | Module | Reads (cached) | Writes (pipeline) |
//! |--------|----------------|-------------------|
//! | [`balance`] | wallet and token balances | |
//! | [`protocol`] | NAV, stats | |
//! | [`pools`] | pools, markets, gauges, gauge rewards | |
//! | [`transactions`] | status (uncached) | transfer, approve, mint, redeem, pool and gauge actions |
//! | [`wallets`] | | key import and removal |

pub mod balance;
pub mod pools;
pub mod protocol;
pub mod transactions;
pub mod wallets;
