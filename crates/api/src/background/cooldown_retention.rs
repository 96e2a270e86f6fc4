//! Periodic cleanup of stale alert cooldowns.
//!
//! Deletes rows from `alert_cooldowns` that have not been written for longer
//! than the retention period. The period must exceed the longest cooldown
//! window, otherwise an entry could be purged while it still suppresses
//! alerts; shorter configured values are raised to that window.

use std::time::Duration;

use chrono::Utc;
use gestora_core::alert::CooldownPolicy;
use gestora_db::repositories::CooldownRepo;
use gestora_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Default retention period: 30 days.
const DEFAULT_RETENTION_DAYS: i64 = 30;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(6 * 3600);

/// Effective retention: the configured days, but never shorter than the
/// longest cooldown window.
pub fn retention_period(retention_days: i64, policy: &CooldownPolicy) -> chrono::Duration {
    let configured = chrono::Duration::days(retention_days.max(0));
    let floor = chrono::Duration::from_std(policy.longest_window())
        .unwrap_or(chrono::Duration::MAX);
    configured.max(floor)
}

/// Run the cooldown retention loop until `cancel` is triggered.
pub async fn run(pool: DbPool, policy: CooldownPolicy, cancel: CancellationToken) {
    let retention_days: i64 = std::env::var("COOLDOWN_RETENTION_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETENTION_DAYS);
    let retention = retention_period(retention_days, &policy);

    tracing::info!(
        retention_days = retention.num_days(),
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Cooldown retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cooldown retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let Some(cutoff) = Utc::now().checked_sub_signed(retention) else {
                    continue;
                };
                match CooldownRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Cooldown retention: purged stale entries");
                    }
                    Ok(_) => {
                        tracing::debug!("Cooldown retention: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Cooldown retention: cleanup failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_never_undercuts_longest_window() {
        let policy = CooldownPolicy::default();
        assert_eq!(retention_period(1, &policy), chrono::Duration::days(7));
        assert_eq!(retention_period(30, &policy), chrono::Duration::days(30));
    }
}
