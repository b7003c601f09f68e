// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Applications embedding it
//! can call [`init_logging`]: `LOG_FORMAT=json` for structured logs, anything
//! else for pretty text, filtered by `RUST_LOG`.

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LOG_FORMAT_ENV;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Read the format from `LOG_FORMAT`.
    pub fn from_env() -> Self {
        Self::parse(env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install the global subscriber, returning an error if one is already set.
pub fn try_init_logging(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    }
}

/// Install the global subscriber using `LOG_FORMAT` and `RUST_LOG`.
///
/// Returns `false`, after a debug event on the existing subscriber, if one
/// was already installed.
pub fn init_logging() -> bool {
    match try_init_logging(LogFormat::from_env()) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Global subscriber already installed, keeping it");
            false
        }
    }
}
