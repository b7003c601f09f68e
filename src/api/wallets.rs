// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing key management.

use crate::blockchain::derive_address;
use crate::client::FxClient;
use crate::error::{ClientError, ClientResult};
use crate::validation::{is_valid_private_key, validate_address};

impl FxClient {
    /// Store `private_key_hex` and return the address it controls.
    pub async fn import_wallet(&self, private_key_hex: &str) -> ClientResult<String> {
        if !is_valid_private_key(private_key_hex) {
            return Err(ClientError::SecureStorageError(
                "private key must be 0x followed by 64 hex characters".to_string(),
            ));
        }
        let address = derive_address(private_key_hex)?;
        self.keystore.store(private_key_hex, &address)?;
        tracing::info!(address = %address, "Imported wallet");
        Ok(address)
    }

    /// Forget the key for `address`. No-op if none is stored.
    pub async fn remove_wallet(&self, address: &str) -> ClientResult<()> {
        validate_address(address)?;
        self.keystore.delete(address)
    }

    pub async fn has_wallet(&self, address: &str) -> ClientResult<bool> {
        validate_address(address)?;
        self.keystore.exists(address)
    }
}
