// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test doubles shared by the pipeline and client tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use zeroize::Zeroizing;

use crate::blockchain::signing::TransactionSigner;
use crate::blockchain::types::{UnsignedTransaction, BROADCAST_PATH};
use crate::error::{ClientError, ClientResult};
use crate::storage::keystore::{MemoryKeyStore, SecureKeyStore};
use crate::transport::Transport;

pub const WALLET: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const OTHER: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// A legacy transaction body as the prepare endpoints return it.
pub fn prepared_tx() -> Value {
    json!({
        "to": OTHER,
        "data": "0x",
        "value": "0",
        "gas": "21000",
        "gasPrice": "1000000000",
        "nonce": "0",
        "chainId": "1"
    })
}

pub fn broadcast_ok() -> Value {
    json!({
        "success": true,
        "transactionHash": "0xfeed",
        "status": "submitted"
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport returning canned responses by path and recording every call.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, ClientResult<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub answering every prepare path and the broadcast path successfully.
    pub fn for_writes(prepare_path: &str) -> Self {
        let stub = Self::new();
        stub.respond(prepare_path, Ok(prepared_tx()));
        stub.respond(BROADCAST_PATH, Ok(broadcast_ok()));
        stub
    }

    pub fn respond(&self, path: &str, response: ClientResult<Value>) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ClientError::from_status(404, Some(format!("no stub for {path}")))))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_value(&self, path: &str) -> ClientResult<Value> {
        self.answer("GET", path, None)
    }

    async fn post_value(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.answer("POST", path, Some(body))
    }
}

/// Signer counting invocations; fails when built with an error.
#[derive(Default)]
pub struct CountingSigner {
    pub calls: AtomicUsize,
    failure: Option<ClientError>,
}

impl CountingSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(error),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransactionSigner for CountingSigner {
    fn sign(&self, _tx: &UnsignedTransaction, _key: &str) -> ClientResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok("0xsigned".to_string()),
        }
    }
}

type FetchObserver = Box<dyn Fn() -> usize + Send + Sync>;

/// In-memory key store counting existence checks and fetches.
#[derive(Default)]
pub struct CountingKeyStore {
    inner: MemoryKeyStore,
    pub fetches: AtomicUsize,
    pub exists_checks: AtomicUsize,
    observer: Mutex<Option<FetchObserver>>,
    seen_at_fetch: Mutex<Vec<usize>>,
    exists_override: Mutex<Option<bool>>,
}

impl CountingKeyStore {
    pub fn with_key(address: &str) -> Self {
        let store = Self::default();
        store.inner.store(KEY, address).unwrap();
        store
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn exists_count(&self) -> usize {
        self.exists_checks.load(Ordering::SeqCst)
    }

    /// Run `observer` on every fetch and record what it returns.
    pub fn on_fetch(&self, observer: impl Fn() -> usize + Send + Sync + 'static) {
        *self.observer.lock().unwrap() = Some(Box::new(observer));
    }

    pub fn calls_seen_at_fetch(&self) -> Vec<usize> {
        self.seen_at_fetch.lock().unwrap().clone()
    }

    /// Answer every `exists` with `value`, whatever is stored.
    pub fn report_exists(&self, value: bool) {
        *self.exists_override.lock().unwrap() = Some(value);
    }
}

impl SecureKeyStore for CountingKeyStore {
    fn store(&self, private_key: &str, address: &str) -> ClientResult<()> {
        self.inner.store(private_key, address)
    }

    fn fetch(&self, address: &str) -> ClientResult<Option<Zeroizing<String>>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(observer) = self.observer.lock().unwrap().as_ref() {
            self.seen_at_fetch.lock().unwrap().push(observer());
        }
        self.inner.fetch(address)
    }

    fn delete(&self, address: &str) -> ClientResult<()> {
        self.inner.delete(address)
    }

    fn exists(&self, address: &str) -> ClientResult<bool> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        match *self.exists_override.lock().unwrap() {
            Some(value) => Ok(value),
            None => self.inner.exists(address),
        }
    }
}
