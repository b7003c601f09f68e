// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client error taxonomy.
//!
//! Every failure surfaced to callers is a [`ClientError`]. The cache layer never
//! produces one: its failures degrade to a miss or a no-op.

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// An address argument is not `0x` followed by 40 hex characters.
    #[error("Invalid Ethereum address: {0:?} (expected 0x followed by 40 hex characters)")]
    InvalidAddress(String),

    /// A transaction hash argument is not `0x` followed by 64 hex characters.
    #[error("Invalid transaction hash: {0:?}")]
    InvalidTransactionHash(String),

    /// Client configuration could not be loaded or is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No signing key is stored for the wallet address.
    #[error("Wallet not found: no private key is stored for this address")]
    WalletNotFound,

    /// Transport failure, optionally carrying the HTTP status.
    #[error("{}", describe_network_error(.status_code, .message))]
    NetworkError {
        status_code: Option<u16>,
        message: Option<String>,
    },

    /// Structured error returned in the remote API's response body.
    #[error("API error {code}: {message}")]
    ApiError { code: String, message: String },

    /// A success response whose body could not be used.
    #[error("Invalid response from server{}", suffix(.0))]
    InvalidResponse(Option<String>),

    /// Request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    EncodingError(String),

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    DecodingError(String),

    /// Key store failure.
    #[error("Secure storage error: {0}")]
    SecureStorageError(String),

    /// The unsigned transaction could not be signed.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// The network rejected or failed the submitted transaction.
    #[error("Transaction failed{}", suffix(.0))]
    TransactionFailed(Option<String>),
}

/// Coarse categories callers can branch on without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input was rejected before any I/O.
    InvalidInput,
    /// HTTP 400.
    BadRequest,
    /// HTTP 401 / 403.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Timeouts, connection failures, and other statuses.
    Network,
    /// Structured error body from the API.
    Api,
    /// Missing or malformed client configuration.
    Configuration,
    /// Malformed payloads in either direction.
    Serialization,
    /// Key store or signing failures.
    Wallet,
    /// Submitted transaction was not accepted.
    Transaction,
}

impl ErrorCategory {
    /// Map an HTTP status code to a category.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::Network,
        }
    }

    /// Human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::BadRequest => "bad request",
            Self::Unauthorized => "authentication failed",
            Self::NotFound => "not found",
            Self::RateLimited => "rate limited",
            Self::ServerError => "server error",
            Self::Network => "network error",
            Self::Api => "API error",
            Self::Configuration => "configuration error",
            Self::Serialization => "serialization error",
            Self::Wallet => "wallet error",
            Self::Transaction => "transaction error",
        }
    }
}

impl ClientError {
    /// Build a network error from an HTTP status and optional body message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        Self::NetworkError {
            status_code: Some(status),
            message,
        }
    }

    /// Network error without a status (timeouts, connection failures).
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            status_code: None,
            message: Some(message.into()),
        }
    }

    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAddress(_) | Self::InvalidTransactionHash(_) => {
                ErrorCategory::InvalidInput
            }
            Self::InvalidConfig(_) => ErrorCategory::Configuration,
            Self::WalletNotFound | Self::SecureStorageError(_) | Self::SigningError(_) => {
                ErrorCategory::Wallet
            }
            Self::NetworkError {
                status_code: Some(status),
                ..
            } => ErrorCategory::from_status(*status),
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::ApiError { .. } => ErrorCategory::Api,
            Self::InvalidResponse(_) | Self::EncodingError(_) | Self::DecodingError(_) => {
                ErrorCategory::Serialization
            }
            Self::TransactionFailed(_) => ErrorCategory::Transaction,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NetworkError { status_code, .. } => *status_code,
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.category() == ErrorCategory::RateLimited
    }
}

fn describe_network_error(status_code: &Option<u16>, message: &Option<String>) -> String {
    let head = match status_code {
        Some(status) => format!(
            "Network error ({}, HTTP {status})",
            ErrorCategory::from_status(*status).label()
        ),
        None => "Network error".to_string(),
    };
    match message.as_deref() {
        Some(msg) if !msg.is_empty() => format!("{head}: {msg}"),
        _ => head,
    }
}

fn suffix(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(msg) if !msg.is_empty() => format!(": {msg}"),
        _ => String::new(),
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DecodingError(e.to_string())
    }
}
