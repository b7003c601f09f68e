// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Input validation for address- and key-shaped arguments.

use crate::error::{ClientError, ClientResult};

/// `true` if `address` is `0x` followed by exactly 40 hex characters.
pub fn is_valid_address(address: &str) -> bool {
    is_prefixed_hex(address, 40)
}

/// `true` if `key` is `0x` followed by exactly 64 hex characters.
pub fn is_valid_private_key(key: &str) -> bool {
    is_prefixed_hex(key, 64)
}

/// `true` if `hash` is `0x` followed by exactly 64 hex characters.
pub fn is_valid_tx_hash(hash: &str) -> bool {
    is_prefixed_hex(hash, 64)
}

/// Validate an Ethereum address.
pub fn validate_address(address: &str) -> ClientResult<()> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(ClientError::InvalidAddress(address.to_string()))
    }
}

/// Validate every address in order, failing on the first invalid one.
pub fn validate_addresses<'a, I>(addresses: I) -> ClientResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    addresses.into_iter().try_for_each(validate_address)
}

/// Validate a transaction hash before it is used as a path segment.
pub fn validate_tx_hash(hash: &str) -> ClientResult<()> {
    if is_valid_tx_hash(hash) {
        Ok(())
    } else {
        Err(ClientError::InvalidTransactionHash(hash.to_string()))
    }
}

fn is_prefixed_hex(value: &str, hex_len: usize) -> bool {
    match value.strip_prefix("0x") {
        Some(rest) => rest.len() == hex_len && rest.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses() {
        assert!(is_valid_address("0x1111111111111111111111111111111111111111"));
        assert!(is_valid_address("0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_address("1111111111111111111111111111111111111111"));
        assert!(!is_valid_address("0x111"));
        assert!(!is_valid_address("0xZZ11111111111111111111111111111111111111"));
        assert!(!is_valid_address("0X1111111111111111111111111111111111111111"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn validate_addresses_reports_first_failure() {
        let err = validate_addresses([
            "0x1111111111111111111111111111111111111111",
            "bad",
            "also-bad",
        ])
        .unwrap_err();
        assert_eq!(err, ClientError::InvalidAddress("bad".to_string()));
    }

    #[test]
    fn private_key_format() {
        assert!(is_valid_private_key(&format!("0x{}", "ab".repeat(32))));
        assert!(!is_valid_private_key(&"ab".repeat(32)));
        assert!(!is_valid_private_key(&format!("0x{}", "ab".repeat(31))));
    }

    #[test]
    fn tx_hash_format() {
        assert!(validate_tx_hash(&format!("0x{}", "0f".repeat(32))).is_ok());
        assert!(matches!(
            validate_tx_hash("0xabc/../balances"),
            Err(ClientError::InvalidTransactionHash(_))
        ));
    }
}
