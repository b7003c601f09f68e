// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Default time-to-live values.

use std::time::Duration;

/// TTL presets by data category and tier.
pub struct CacheTtl;

impl CacheTtl {
    /// Wallet balances change with every transaction.
    pub const BALANCE: Duration = Duration::from_secs(30);
    /// Pool and market state (prices, utilisation).
    pub const MARKET: Duration = Duration::from_secs(60);
    /// Protocol-wide figures such as NAV and TVL.
    pub const PROTOCOL: Duration = Duration::from_secs(5 * 60);
    /// Rarely changing metadata (gauge lists, token metadata).
    pub const STATIC: Duration = Duration::from_secs(60 * 60);

    /// Memory tier default when a write does not specify a TTL.
    pub const MEMORY_DEFAULT: Duration = Duration::from_secs(5 * 60);
    /// Disk tier default when a write does not specify a TTL.
    ///
    /// Longer than [`Self::MEMORY_DEFAULT`] so a cold process can still be
    /// served from disk.
    pub const DISK_DEFAULT: Duration = Duration::from_secs(60 * 60);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_outlives_memory() {
        assert!(CacheTtl::DISK_DEFAULT > CacheTtl::MEMORY_DEFAULT);
        assert!(CacheTtl::BALANCE < CacheTtl::PROTOCOL);
    }
}
