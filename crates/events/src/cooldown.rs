//! Per-entity alert throttling.
//!
//! The registry stores, per composite key (`"{kind}:{entity_id}"`), the time
//! the alert was last emitted. A read failure or an unreadable value lets
//! the alert through: a duplicate notification is preferable to a lost one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use gestora_core::types::Timestamp;

use crate::error::KvError;
use crate::kv::KeyValueStore;

/// Decides whether a repeating alert may be emitted again.
#[derive(Clone)]
pub struct CooldownRegistry {
    store: Arc<dyn KeyValueStore>,
}

impl CooldownRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// `true` when `key` has no record, its record is unreadable, or at
    /// least `window` has passed since it was recorded.
    pub async fn should_notify(&self, key: &str, window: Duration, now: Timestamp) -> bool {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cooldown lookup failed; allowing alert");
                return true;
            }
        };

        let Some(last) = parse_timestamp(&raw) else {
            tracing::warn!(key, value = %raw, "Unparseable cooldown value; allowing alert");
            return true;
        };

        let window = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(last) >= window
    }

    /// Record that the alert for `key` was emitted at `now`.
    pub async fn record_notified(&self, key: &str, now: Timestamp) -> Result<(), KvError> {
        self.store.set(key, &now.to_rfc3339()).await
    }
}

/// Parse a stored value: RFC 3339, or integer epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}
