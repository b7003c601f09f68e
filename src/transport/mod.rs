// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transport contract consumed by the cache-backed reads and the transaction
//! pipeline.
//!
//! Implementations move JSON over the wire and map failures into
//! [`ClientError`](crate::error::ClientError): non-2xx responses become
//! `ApiError` when the body carries a structured error and `NetworkError`
//! otherwise.

pub mod http;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

pub use http::HttpTransport;

/// JSON request/response transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path`, returning the decoded JSON body.
    async fn get_value(&self, path: &str) -> ClientResult<Value>;

    /// `POST path` with a JSON body, returning the decoded JSON body.
    async fn post_value(&self, path: &str, body: Value) -> ClientResult<Value>;
}

/// Typed helpers over any [`Transport`].
#[async_trait]
pub trait TransportExt: Transport {
    /// `GET path` decoded into `T`.
    async fn get_json<T>(&self, path: &str) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.get_value(path).await?;
        decode(path, value)
    }

    /// `POST path` with `body`, decoded into `T`.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::EncodingError(format!("POST {path}: {e}")))?;
        let value = self.post_value(path, body).await?;
        decode(path, value)
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::DecodingError(format!("{path}: {e}")))
}
