// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Protocol-wide figures.

use crate::cache::{CacheKey, CacheTtl};
use crate::client::FxClient;
use crate::error::ClientResult;
use crate::models::{ProtocolNav, ProtocolStats};

impl FxClient {
    pub async fn protocol_nav(&self) -> ClientResult<ProtocolNav> {
        self.cached_get(&CacheKey::protocol_nav(), CacheTtl::PROTOCOL, "/v1/protocol/nav")
            .await
    }

    pub async fn protocol_stats(&self) -> ClientResult<ProtocolStats> {
        self.cached_get(&CacheKey::protocol_stats(), CacheTtl::PROTOCOL, "/v1/protocol/stats")
            .await
    }
}
