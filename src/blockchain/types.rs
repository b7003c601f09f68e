// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction wire types exchanged with the prepare and broadcast endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Path of the broadcast endpoint.
pub const BROADCAST_PATH: &str = "/v1/transactions/broadcast";

/// Transaction built by the API for the client to sign.
///
/// Numeric fields are kept as the strings the server sent (decimal or
/// `0x`-prefixed hex; JSON numbers are accepted and stringified) and parsed
/// by the signer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    pub to: String,
    #[serde(default = "empty_calldata")]
    pub data: String,
    #[serde(with = "quantity")]
    pub value: String,
    /// Gas limit.
    #[serde(with = "quantity")]
    pub gas: String,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(with = "quantity")]
    pub nonce: String,
    #[serde(with = "quantity")]
    pub chain_id: String,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub estimated_gas: Option<String>,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub estimated_gas_cost_wei: Option<String>,
}

fn empty_calldata() -> String {
    "0x".to_string()
}

/// Gas pricing scheme of a prepared transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeMode<'a> {
    Legacy {
        gas_price: &'a str,
    },
    FeeMarket {
        max_fee_per_gas: &'a str,
        max_priority_fee_per_gas: &'a str,
    },
}

impl UnsignedTransaction {
    /// Select the gas pricing scheme.
    ///
    /// Exactly one of `gasPrice` or the complete fee-market pair must be set.
    pub fn fee_mode(&self) -> ClientResult<FeeMode<'_>> {
        match (
            self.gas_price.as_deref(),
            self.max_fee_per_gas.as_deref(),
            self.max_priority_fee_per_gas.as_deref(),
        ) {
            (Some(gas_price), None, None) => Ok(FeeMode::Legacy { gas_price }),
            (None, Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => Ok(FeeMode::FeeMarket {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            }),
            (None, None, None) => Err(ClientError::SigningError(
                "missing gasPrice or maxFeePerGas/maxPriorityFeePerGas".to_string(),
            )),
            (Some(_), _, _) => Err(ClientError::SigningError(
                "both gasPrice and fee-market fields are set".to_string(),
            )),
            (None, _, _) => Err(ClientError::SigningError(
                "incomplete fee-market pair".to_string(),
            )),
        }
    }
}

/// Body of the broadcast call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub signed_transaction: String,
}

/// Submission outcome reported by the broadcast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResult {
    pub success: bool,
    pub transaction_hash: String,
    pub status: String,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub gas_estimate: Option<String>,
    #[serde(default, with = "quantity::option", skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
}

/// Accept a JSON string or number, keep it as a string.
pub(crate) mod quantity {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    impl From<Raw> for String {
        fn from(raw: Raw) -> Self {
            match raw {
                Raw::Str(s) => s,
                Raw::Num(n) => n.to_string(),
            }
        }
    }

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Raw::deserialize(deserializer).map(String::from)
    }

    pub mod option {
        use super::Raw;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<String>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_some(v),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<String>, D::Error> {
            Ok(Option::<Raw>::deserialize(deserializer)?.map(String::from))
        }
    }
}
