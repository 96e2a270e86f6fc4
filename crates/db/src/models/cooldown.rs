//! Alert cooldown rows.

use gestora_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `alert_cooldowns` table.
///
/// `value` is whatever the key-value layer wrote; `updated_at` is maintained
/// by the database and drives retention.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertCooldown {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
