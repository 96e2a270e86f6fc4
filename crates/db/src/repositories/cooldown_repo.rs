//! Repository for the `alert_cooldowns` key-value table.

use gestora_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::cooldown::AlertCooldown;

/// Column list for `alert_cooldowns` queries.
const COLUMNS: &str = "key, value, updated_at";

/// Provides get/set/purge operations for cooldown timestamps.
pub struct CooldownRepo;

impl CooldownRepo {
    /// Look up the row for `key`.
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<AlertCooldown>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alert_cooldowns WHERE key = $1");
        sqlx::query_as::<_, AlertCooldown>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite the value stored under `key`.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO alert_cooldowns (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete rows not written since `cutoff`. Returns the number removed.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alert_cooldowns WHERE updated_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
