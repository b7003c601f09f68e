// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local transaction signing.
//!
//! Keys arrive as `0x`-prefixed hex from the key store and are parsed into an
//! alloy [`PrivateKeySigner`] for the duration of one call. The output is the
//! EIP-2718 encoding of the signed transaction as `0x` hex, ready for the
//! broadcast endpoint.

use std::str::FromStr;

use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    hex,
    primitives::{Address, Bytes, TxKind, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use zeroize::Zeroizing;

use super::types::{FeeMode, UnsignedTransaction};
use crate::error::{ClientError, ClientResult};

/// Produces a signed raw transaction from a prepared one. Never performs I/O.
pub trait TransactionSigner: Send + Sync {
    fn sign(&self, tx: &UnsignedTransaction, private_key_hex: &str) -> ClientResult<String>;
}

/// Signs with an in-process secp256k1 key.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSigner;

impl LocalSigner {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionSigner for LocalSigner {
    fn sign(&self, tx: &UnsignedTransaction, private_key_hex: &str) -> ClientResult<String> {
        let signer = signer_from_hex(private_key_hex)?;

        let to = Address::from_str(&tx.to)
            .map_err(|e| ClientError::SigningError(format!("invalid recipient {:?}: {e}", tx.to)))?;
        let input = Bytes::from_str(&tx.data)
            .map_err(|e| ClientError::SigningError(format!("invalid calldata: {e}")))?;
        let value = parse_u256("value", &tx.value)?;
        let nonce = parse_u64("nonce", &tx.nonce)?;
        let gas_limit = parse_u64("gas", &tx.gas)?;
        let chain_id = parse_u64("chainId", &tx.chain_id)?;

        let envelope: TxEnvelope = match tx.fee_mode()? {
            FeeMode::Legacy { gas_price } => {
                let unsigned = TxLegacy {
                    chain_id: Some(chain_id),
                    nonce,
                    gas_price: parse_u128("gasPrice", gas_price)?,
                    gas_limit,
                    to: TxKind::Call(to),
                    value,
                    input,
                };
                let signature = signer
                    .sign_hash_sync(&unsigned.signature_hash())
                    .map_err(|e| ClientError::SigningError(e.to_string()))?;
                unsigned.into_signed(signature).into()
            }
            FeeMode::FeeMarket {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                let unsigned = TxEip1559 {
                    chain_id,
                    nonce,
                    gas_limit,
                    max_fee_per_gas: parse_u128("maxFeePerGas", max_fee_per_gas)?,
                    max_priority_fee_per_gas: parse_u128(
                        "maxPriorityFeePerGas",
                        max_priority_fee_per_gas,
                    )?,
                    to: TxKind::Call(to),
                    value,
                    access_list: Default::default(),
                    input,
                };
                let signature = signer
                    .sign_hash_sync(&unsigned.signature_hash())
                    .map_err(|e| ClientError::SigningError(e.to_string()))?;
                unsigned.into_signed(signature).into()
            }
        };

        tracing::debug!(
            from = %signer.address(),
            to = %to,
            nonce,
            chain_id,
            "Signed transaction"
        );

        Ok(hex::encode_prefixed(envelope.encoded_2718()))
    }
}

/// Checksummed address controlled by `private_key_hex`.
pub fn derive_address(private_key_hex: &str) -> ClientResult<String> {
    Ok(signer_from_hex(private_key_hex)?.address().to_checksum(None))
}

fn signer_from_hex(private_key_hex: &str) -> ClientResult<PrivateKeySigner> {
    let bytes = Zeroizing::new(
        hex::decode(private_key_hex)
            .map_err(|e| ClientError::SigningError(format!("invalid private key: {e}")))?,
    );
    PrivateKeySigner::from_slice(&bytes)
        .map_err(|e| ClientError::SigningError(format!("invalid private key: {e}")))
}

fn parse_u256(field: &str, raw: &str) -> ClientResult<U256> {
    U256::from_str(raw.trim())
        .map_err(|e| ClientError::SigningError(format!("malformed {field} {raw:?}: {e}")))
}

fn parse_u128(field: &str, raw: &str) -> ClientResult<u128> {
    u128::try_from(parse_u256(field, raw)?)
        .map_err(|_| ClientError::SigningError(format!("{field} {raw:?} out of range")))
}

fn parse_u64(field: &str, raw: &str) -> ClientResult<u64> {
    u64::try_from(parse_u256(field, raw)?)
        .map_err(|_| ClientError::SigningError(format!("{field} {raw:?} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::eips::eip2718::Decodable2718;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ADDR: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
    const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12";

    fn unsigned() -> UnsignedTransaction {
        UnsignedTransaction {
            to: RECIPIENT.to_string(),
            data: "0xa9059cbb".to_string(),
            value: "1000000000000000000".to_string(),
            gas: "0x5208".to_string(),
            gas_price: None,
            max_fee_per_gas: Some("30000000000".to_string()),
            max_priority_fee_per_gas: Some("1500000000".to_string()),
            nonce: "3".to_string(),
            chain_id: "1".to_string(),
            estimated_gas: None,
            estimated_gas_cost_wei: None,
        }
    }

    fn decode(raw: &str) -> TxEnvelope {
        let bytes = hex::decode(raw).unwrap();
        TxEnvelope::decode_2718(&mut bytes.as_slice()).unwrap()
    }

    #[test]
    fn derives_known_address() {
        assert_eq!(derive_address(KEY).unwrap(), ADDR);
        assert!(matches!(derive_address("0x1234"), Err(ClientError::SigningError(_))));
    }

    #[test]
    fn signs_fee_market_transaction() {
        let raw = LocalSigner::new().sign(&unsigned(), KEY).unwrap();
        assert!(raw.starts_with("0x02"));

        let TxEnvelope::Eip1559(signed) = decode(&raw) else {
            panic!("expected EIP-1559 envelope");
        };
        let tx = signed.tx();
        assert_eq!(tx.chain_id, 1);
        assert_eq!(tx.nonce, 3);
        assert_eq!(tx.gas_limit, 21_000);
        assert_eq!(tx.max_fee_per_gas, 30_000_000_000);
        assert_eq!(tx.max_priority_fee_per_gas, 1_500_000_000);
        assert_eq!(tx.to, TxKind::Call(Address::from_str(RECIPIENT).unwrap()));
        assert_eq!(tx.value, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(tx.input, Bytes::from_str("0xa9059cbb").unwrap());

        let recovered = signed
            .signature()
            .recover_address_from_prehash(&signed.signature_hash())
            .unwrap();
        assert_eq!(recovered, Address::from_str(ADDR).unwrap());
    }

    #[test]
    fn signs_legacy_transaction() {
        let mut tx = unsigned();
        tx.max_fee_per_gas = None;
        tx.max_priority_fee_per_gas = None;
        tx.gas_price = Some("0x3b9aca00".to_string());

        let raw = LocalSigner::new().sign(&tx, KEY).unwrap();
        let TxEnvelope::Legacy(signed) = decode(&raw) else {
            panic!("expected legacy envelope");
        };
        assert_eq!(signed.tx().gas_price, 1_000_000_000);
        assert_eq!(signed.tx().chain_id, Some(1));

        let recovered = signed
            .signature()
            .recover_address_from_prehash(&signed.signature_hash())
            .unwrap();
        assert_eq!(recovered, Address::from_str(ADDR).unwrap());
    }

    #[test]
    fn rejects_malformed_fields() {
        let signer = LocalSigner::new();

        let mut tx = unsigned();
        tx.nonce = "seven".to_string();
        assert!(matches!(signer.sign(&tx, KEY), Err(ClientError::SigningError(_))));

        let mut tx = unsigned();
        tx.to = "0xnope".to_string();
        assert!(matches!(signer.sign(&tx, KEY), Err(ClientError::SigningError(_))));

        let mut tx = unsigned();
        tx.max_fee_per_gas = None;
        tx.max_priority_fee_per_gas = None;
        assert!(matches!(signer.sign(&tx, KEY), Err(ClientError::SigningError(_))));

        let mut tx = unsigned();
        tx.gas = "0x1ffffffffffffffff".to_string();
        assert!(matches!(signer.sign(&tx, KEY), Err(ClientError::SigningError(_))));

        assert!(matches!(
            signer.sign(&unsigned(), "not-a-key"),
            Err(ClientError::SigningError(_))
        ));
    }
}
