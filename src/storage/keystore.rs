// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Private key storage, keyed by wallet address.
//!
//! Addresses are normalized to lowercase, so `0xAbC…` and `0xabc…` name the
//! same slot. Keys leave the store wrapped in [`Zeroizing`] and are wiped when
//! the caller drops them.
//!
//! ## File Layout
//!
//! ```text
//! <data_dir>/keys/
//!   0x<40 hex>.key    # 0x-prefixed private key, mode 0600 on unix
//! ```

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use zeroize::Zeroizing;

use crate::error::{ClientError, ClientResult};
use crate::validation::{is_valid_private_key, validate_address};

const KEY_EXTENSION: &str = "key";

/// Storage for signing keys.
pub trait SecureKeyStore: Send + Sync {
    /// Store `private_key` for `address`, replacing any previous key.
    fn store(&self, private_key: &str, address: &str) -> ClientResult<()>;

    /// Key for `address`, or `None` if nothing is stored.
    fn fetch(&self, address: &str) -> ClientResult<Option<Zeroizing<String>>>;

    /// Remove the key for `address`. No-op if absent.
    fn delete(&self, address: &str) -> ClientResult<()>;

    fn exists(&self, address: &str) -> ClientResult<bool> {
        Ok(self.fetch(address)?.is_some())
    }
}

fn normalize(address: &str) -> ClientResult<String> {
    validate_address(address)?;
    Ok(address.to_ascii_lowercase())
}

fn check_key(private_key: &str) -> ClientResult<()> {
    if is_valid_private_key(private_key) {
        Ok(())
    } else {
        Err(ClientError::SecureStorageError(
            "private key must be 0x followed by 64 hex characters".to_string(),
        ))
    }
}

fn storage_error(op: &str, e: io::Error) -> ClientError {
    ClientError::SecureStorageError(format!("{op}: {e}"))
}

// =============================================================================
// File-backed store
// =============================================================================

/// One file per address under a single directory.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    dir: PathBuf,
}

impl FileKeyStore {
    /// Use `dir` for key files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, normalized: &str) -> PathBuf {
        self.dir.join(format!("{normalized}.{KEY_EXTENSION}"))
    }

    /// Write to a temp file first, then rename for atomicity.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("tmp");
        {
            let mut file = open_private(&temp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl SecureKeyStore for FileKeyStore {
    fn store(&self, private_key: &str, address: &str) -> ClientResult<()> {
        check_key(private_key)?;
        let address = normalize(address)?;
        let path = self.key_path(&address);

        self.write_atomic(&path, private_key.as_bytes())
            .map_err(|e| storage_error("failed to write key", e))?;

        tracing::info!(address = %address, "Stored signing key");
        Ok(())
    }

    fn fetch(&self, address: &str) -> ClientResult<Option<Zeroizing<String>>> {
        let path = self.key_path(&normalize(address)?);

        let mut raw = match fs::read_to_string(&path) {
            Ok(raw) => Zeroizing::new(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("failed to read key", e)),
        };

        let len = raw.trim_end().len();
        raw.truncate(len);

        if !is_valid_private_key(&raw) {
            return Err(ClientError::SecureStorageError(format!(
                "stored key at {} is malformed",
                path.display()
            )));
        }
        Ok(Some(raw))
    }

    fn delete(&self, address: &str) -> ClientResult<()> {
        let address = normalize(address)?;
        match fs::remove_file(self.key_path(&address)) {
            Ok(()) => {
                tracing::info!(address = %address, "Deleted signing key");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("failed to delete key", e)),
        }
    }

    fn exists(&self, address: &str) -> ClientResult<bool> {
        // Existence is a metadata check; no need to read key material.
        Ok(self.key_path(&normalize(address)?).is_file())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Volatile store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: Mutex<HashMap<String, Zeroizing<String>>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, HashMap<String, Zeroizing<String>>>> {
        self.keys
            .lock()
            .map_err(|_| ClientError::SecureStorageError("key store lock poisoned".to_string()))
    }
}

impl SecureKeyStore for MemoryKeyStore {
    fn store(&self, private_key: &str, address: &str) -> ClientResult<()> {
        check_key(private_key)?;
        let address = normalize(address)?;
        self.lock()?
            .insert(address, Zeroizing::new(private_key.to_string()));
        Ok(())
    }

    fn fetch(&self, address: &str) -> ClientResult<Option<Zeroizing<String>>> {
        let address = normalize(address)?;
        Ok(self.lock()?.get(&address).cloned())
    }

    fn delete(&self, address: &str) -> ClientResult<()> {
        let address = normalize(address)?;
        self.lock()?.remove(&address);
        Ok(())
    }

    fn exists(&self, address: &str) -> ClientResult<bool> {
        let address = normalize(address)?;
        Ok(self.lock()?.contains_key(&address))
    }
}
