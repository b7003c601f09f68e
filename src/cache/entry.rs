// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cache entries and the type-erased envelope both tiers store.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A cached value with its creation time and time-to-live.
///
/// Entries are never mutated; a new `set` for the same key replaces the entry.
/// This is also the persisted shape of the disk tier:
/// `{"value": ..., "createdAt": ..., "ttl": <seconds>, "key": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: DateTime<Utc>,
    #[serde(with = "ttl_seconds")]
    pub ttl: Duration,
    pub key: String,
}

impl<V> CacheEntry<V> {
    /// Create an entry stamped with the current time.
    pub fn new(key: impl Into<String>, value: V, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Utc::now(),
            ttl,
            key: key.into(),
        }
    }

    /// `true` once more than `ttl` has elapsed since creation.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.created_at, self.ttl, now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Type-erased entry: the value is held as JSON bytes and decoded on read
/// into whatever type the caller asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEnvelope {
    pub key: String,
    pub payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEnvelope {
    /// Serialize `value` into a fresh envelope.
    pub fn encode<V: Serialize + ?Sized>(
        key: impl Into<String>,
        value: &V,
        ttl: Duration,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            key: key.into(),
            payload: serde_json::to_vec(value)?,
            created_at: Utc::now(),
            ttl,
        })
    }

    /// Decode the payload. A type mismatch reads as absence.
    pub fn decode<V: DeserializeOwned>(&self) -> Option<V> {
        match serde_json::from_slice(&self.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "Cached value did not decode");
                None
            }
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.created_at, self.ttl, now)
    }

    /// Same payload and creation time under a different TTL.
    pub fn with_ttl(&self, ttl: Duration) -> Self {
        Self {
            ttl,
            ..self.clone()
        }
    }

    /// Persisted JSON form (a `CacheEntry<serde_json::Value>`).
    pub fn to_persisted(&self) -> Result<Vec<u8>, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(&self.payload)?;
        serde_json::to_vec(&CacheEntry {
            value,
            created_at: self.created_at,
            ttl: self.ttl,
            key: self.key.clone(),
        })
    }

    /// Parse the persisted JSON form.
    pub fn from_persisted(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let entry: CacheEntry<serde_json::Value> = serde_json::from_slice(bytes)?;
        Ok(Self {
            payload: serde_json::to_vec(&entry.value)?,
            key: entry.key,
            created_at: entry.created_at,
            ttl: entry.ttl,
        })
    }
}

impl<V: Serialize> TryFrom<&CacheEntry<V>> for CacheEnvelope {
    type Error = serde_json::Error;

    fn try_from(entry: &CacheEntry<V>) -> Result<Self, Self::Error> {
        Ok(Self {
            key: entry.key.clone(),
            payload: serde_json::to_vec(&entry.value)?,
            created_at: entry.created_at,
            ttl: entry.ttl,
        })
    }
}

/// `now - created_at > ttl`. A creation time in the future is never expired.
fn is_expired(created_at: DateTime<Utc>, ttl: Duration, now: DateTime<Utc>) -> bool {
    match (now - created_at).to_std() {
        Ok(age) => age > ttl,
        Err(_) => false,
    }
}

/// TTL as fractional seconds on the wire.
mod ttl_seconds {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(ttl.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn expiry_is_strictly_after_ttl() {
        let entry = CacheEntry::new("k", 1u32, Duration::from_secs(10));
        let created = entry.created_at;

        assert!(!entry.is_expired_at(created));
        assert!(!entry.is_expired_at(created + TimeDelta::seconds(10)));
        assert!(entry.is_expired_at(created + TimeDelta::milliseconds(10_001)));
        assert!(!entry.is_expired_at(created - TimeDelta::seconds(5)));
    }

    #[test]
    fn zero_ttl_expires_immediately_after_creation() {
        let entry = CacheEntry::new("k", "v", Duration::ZERO);
        assert!(entry.is_expired_at(entry.created_at + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn persisted_format_uses_camel_case_and_seconds() {
        let mut entry = CacheEntry::new("balance:all:0xabc", vec![1, 2], Duration::from_millis(1500));
        entry.created_at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);

        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["value"], serde_json::json!([1, 2]));
        assert_eq!(json["ttl"], serde_json::json!(1.5));
        assert_eq!(json["key"], "balance:all:0xabc");
        assert!(json["createdAt"].as_str().unwrap().starts_with("2026-01-02T03:04:05"));
    }

    #[test]
    fn envelope_survives_persistence() {
        let envelope =
            CacheEnvelope::encode("protocol:nav", &serde_json::json!({"nav": "1.02"}), Duration::from_secs(60))
                .unwrap();
        let bytes = envelope.to_persisted().unwrap();
        let restored = CacheEnvelope::from_persisted(&bytes).unwrap();

        assert_eq!(restored.key, envelope.key);
        assert_eq!(restored.ttl, envelope.ttl);
        assert_eq!(restored.created_at, envelope.created_at);
        let value: serde_json::Value = restored.decode().unwrap();
        assert_eq!(value["nav"], "1.02");
    }

    #[test]
    fn decode_type_mismatch_is_none() {
        let envelope = CacheEnvelope::encode("k", "text", Duration::from_secs(1)).unwrap();
        assert_eq!(envelope.decode::<String>(), Some("text".to_string()));
        assert!(envelope.decode::<u64>().is_none());
    }

    #[test]
    fn negative_ttl_is_rejected_on_read() {
        let bytes = br#"{"value":1,"createdAt":"2026-01-02T03:04:05Z","ttl":-1.0,"key":"k"}"#;
        assert!(CacheEnvelope::from_persisted(bytes).is_err());
    }
}
