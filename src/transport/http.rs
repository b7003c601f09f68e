// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! reqwest-backed transport for the f(x) protocol REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use super::Transport;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTPS transport with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("fx-protocol-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .header(REQUEST_ID_HEADER, &request_id)
            .header("Accept", "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, request_id = %request_id, "Sending API request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::network("request timed out")
            } else {
                ClientError::network(format!("{method} {path} failed: {e}"))
            }
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::network("request timed out")
            } else {
                ClientError::network(format!("{method} {path}: failed to read body: {e}"))
            }
        })?;

        if !status.is_success() {
            tracing::warn!(
                %method,
                path,
                request_id = %request_id,
                status = status.as_u16(),
                "API request failed"
            );
            return Err(error_from_response(status, &bytes));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(Some(format!("{method} {path} invalid JSON: {e}")))
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_value(&self, path: &str) -> ClientResult<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post_value(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }
}

/// Map a non-2xx response to an error.
///
/// Structured bodies (`{"error":{"code","message"}}` or `{"code","message"}`)
/// become `ApiError`; anything else becomes `NetworkError` with the status and
/// whatever message the body offers.
fn error_from_response(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    if let Some((code, message)) = parsed.as_ref().and_then(structured_error) {
        return ClientError::ApiError { code, message };
    }

    let message = parsed
        .as_ref()
        .and_then(plain_message)
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .or_else(|| status.canonical_reason().map(str::to_string));

    ClientError::from_status(status.as_u16(), message)
}

fn structured_error(body: &Value) -> Option<(String, String)> {
    let source = match body.get("error") {
        Some(inner @ Value::Object(_)) => inner,
        _ => body,
    };
    let code = match source.get("code")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let message = source.get("message")?.as_str()?.to_string();
    Some((code, message))
}

fn plain_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::transport::TransportExt;
    use axum::{
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
        Json, Router,
    };
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/v1/ok", get(|| async { Json(json!({"value": 1})) }))
            .route(
                "/v1/rate",
                get(|| async { (AxumStatus::TOO_MANY_REQUESTS, "slow down") }),
            )
            .route(
                "/v1/structured",
                get(|| async {
                    (
                        AxumStatus::BAD_REQUEST,
                        Json(json!({"error": {"code": "INVALID_AMOUNT", "message": "amount must be positive"}})),
                    )
                }),
            )
            .route(
                "/v1/flat",
                get(|| async {
                    (
                        AxumStatus::UNPROCESSABLE_ENTITY,
                        Json(json!({"code": 4001, "message": "slippage too high"})),
                    )
                }),
            )
            .route(
                "/v1/unauthorized",
                get(|| async { (AxumStatus::UNAUTHORIZED, Json(json!({"error": "bad api key"}))) }),
            )
            .route("/v1/missing", get(|| async { AxumStatus::NOT_FOUND }))
            .route("/v1/boom", get(|| async { AxumStatus::SERVICE_UNAVAILABLE }))
            .route("/v1/notjson", get(|| async { "hello" }))
            .route(
                "/v1/echo",
                post(|Json(body): Json<Value>| async move { Json(body) }),
            )
            .route(
                "/v1/key",
                get(|headers: HeaderMap| async move {
                    Json(json!({
                        "key": headers.get("x-api-key").and_then(|v| v.to_str().ok()),
                        "hasRequestId": headers.contains_key("x-request-id"),
                    }))
                }),
            )
            .route(
                "/v1/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({}))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn transport(base: &str) -> HttpTransport {
        let config = ClientConfig::new(base)
            .unwrap()
            .with_api_key("test-key")
            .with_request_timeout(Duration::from_millis(300));
        HttpTransport::new(&config).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Ok1 {
        value: u32,
    }

    #[tokio::test]
    async fn decodes_success_body() {
        let t = transport(&spawn_server().await);
        let body: Ok1 = t.get_json("/v1/ok").await.unwrap();
        assert_eq!(body.value, 1);
    }

    #[tokio::test]
    async fn maps_status_codes_to_categories() {
        let t = transport(&spawn_server().await);

        let err = t.get_value("/v1/rate").await.unwrap_err();
        assert_eq!(err, ClientError::from_status(429, Some("slow down".into())));
        assert!(err.is_rate_limited());

        let err = t.get_value("/v1/missing").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = t.get_value("/v1/boom").await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ServerError);

        let err = t.get_value("/v1/unauthorized").await.unwrap_err();
        assert_eq!(err, ClientError::from_status(401, Some("bad api key".into())));
        assert_eq!(err.category(), ErrorCategory::Unauthorized);
    }

    #[tokio::test]
    async fn structured_bodies_become_api_errors() {
        let t = transport(&spawn_server().await);

        let err = t.get_value("/v1/structured").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::ApiError {
                code: "INVALID_AMOUNT".into(),
                message: "amount must be positive".into()
            }
        );

        let err = t.get_value("/v1/flat").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::ApiError {
                code: "4001".into(),
                message: "slippage too high".into()
            }
        );
    }

    #[tokio::test]
    async fn non_json_success_is_invalid_response() {
        let t = transport(&spawn_server().await);
        let err = t.get_value("/v1/notjson").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(Some(_))));
    }

    #[tokio::test]
    async fn posts_json_and_sends_headers() {
        let t = transport(&spawn_server().await);

        let echoed: Value = t.post_json("/v1/echo", &json!({"a": [1, 2]})).await.unwrap();
        assert_eq!(echoed, json!({"a": [1, 2]}));

        let seen: Value = t.get_json("v1/key").await.unwrap();
        assert_eq!(seen["key"], "test-key");
        assert_eq!(seen["hasRequestId"], true);
    }

    #[tokio::test]
    async fn shape_mismatch_is_decoding_error() {
        let t = transport(&spawn_server().await);
        let err = t.get_json::<Vec<String>>("/v1/ok").await.unwrap_err();
        assert!(matches!(err, ClientError::DecodingError(_)));
    }

    #[tokio::test]
    async fn timeout_is_network_error_without_status() {
        let t = transport(&spawn_server().await);
        let err = t.get_value("/v1/slow").await.unwrap_err();
        match err {
            ClientError::NetworkError {
                status_code: None,
                message: Some(msg),
            } => assert_eq!(msg, "request timed out"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
