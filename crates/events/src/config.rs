//! Configuration for the notification store and the business-event watcher.
//!
//! Both structs load from environment variables with sensible defaults, the
//! same way the server configuration does. Invalid values panic at startup.

use std::time::Duration;

use gestora_core::alert::{
    CooldownPolicy, DEFAULT_INVENTORY_COOLDOWN, DEFAULT_MAINTENANCE_LOOKAHEAD_DAYS,
    DEFAULT_OVERDUE_INVOICE_COOLDOWN, DEFAULT_UPCOMING_MAINTENANCE_COOLDOWN,
};

/// Default cap on retained notifications.
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 5;

/// Default delay before a non-persistent notification is removed.
pub const DEFAULT_AUTO_REMOVE_DELAY: Duration = Duration::from_millis(5000);

/// Default interval between watcher polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// NotificationStoreConfig
// ---------------------------------------------------------------------------

/// Notification store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationStoreConfig {
    /// Maximum number of notifications kept; the oldest are evicted.
    pub max_notifications: usize,
    /// Delay applied to non-persistent notifications that don't set their own.
    pub auto_remove_delay: Duration,
}

impl Default for NotificationStoreConfig {
    fn default() -> Self {
        Self {
            max_notifications: DEFAULT_MAX_NOTIFICATIONS,
            auto_remove_delay: DEFAULT_AUTO_REMOVE_DELAY,
        }
    }
}

impl NotificationStoreConfig {
    /// Load from environment variables.
    ///
    /// | Env var                        | Default |
    /// |--------------------------------|---------|
    /// | `NOTIFICATIONS_MAX`            | `5`     |
    /// | `NOTIFICATIONS_AUTO_REMOVE_MS` | `5000`  |
    pub fn from_env() -> Self {
        let max_notifications: usize = std::env::var("NOTIFICATIONS_MAX")
            .unwrap_or_else(|_| DEFAULT_MAX_NOTIFICATIONS.to_string())
            .parse()
            .expect("NOTIFICATIONS_MAX must be a valid usize");

        assert!(max_notifications > 0, "NOTIFICATIONS_MAX must be at least 1");

        let auto_remove_ms: u64 = std::env::var("NOTIFICATIONS_AUTO_REMOVE_MS")
            .unwrap_or_else(|_| DEFAULT_AUTO_REMOVE_DELAY.as_millis().to_string())
            .parse()
            .expect("NOTIFICATIONS_AUTO_REMOVE_MS must be a valid u64");

        Self {
            max_notifications,
            auto_remove_delay: Duration::from_millis(auto_remove_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// WatcherConfig
// ---------------------------------------------------------------------------

/// Business-event watcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub poll_interval: Duration,
    pub cooldowns: CooldownPolicy,
    /// Maintenance due within this many days (inclusive) raises an alert.
    pub maintenance_lookahead_days: i64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            cooldowns: CooldownPolicy::default(),
            maintenance_lookahead_days: DEFAULT_MAINTENANCE_LOOKAHEAD_DAYS,
        }
    }
}

impl WatcherConfig {
    /// Load from environment variables.
    ///
    /// | Env var                               | Default |
    /// |---------------------------------------|---------|
    /// | `WATCHER_POLL_INTERVAL_SECS`          | `60`    |
    /// | `COOLDOWN_INVENTORY_HOURS`            | `12`    |
    /// | `COOLDOWN_OVERDUE_INVOICE_HOURS`      | `168`   |
    /// | `COOLDOWN_UPCOMING_MAINTENANCE_HOURS` | `72`    |
    /// | `MAINTENANCE_LOOKAHEAD_DAYS`          | `7`     |
    pub fn from_env() -> Self {
        let poll_interval_secs: u64 = std::env::var("WATCHER_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL.as_secs().to_string())
            .parse()
            .expect("WATCHER_POLL_INTERVAL_SECS must be a valid u64");

        assert!(
            poll_interval_secs > 0,
            "WATCHER_POLL_INTERVAL_SECS must be at least 1"
        );

        let maintenance_lookahead_days: i64 = std::env::var("MAINTENANCE_LOOKAHEAD_DAYS")
            .unwrap_or_else(|_| DEFAULT_MAINTENANCE_LOOKAHEAD_DAYS.to_string())
            .parse()
            .expect("MAINTENANCE_LOOKAHEAD_DAYS must be a valid i64");

        Self {
            poll_interval: Duration::from_secs(poll_interval_secs),
            cooldowns: CooldownPolicy {
                inventory: hours_from_env("COOLDOWN_INVENTORY_HOURS", DEFAULT_INVENTORY_COOLDOWN),
                overdue_invoice: hours_from_env(
                    "COOLDOWN_OVERDUE_INVOICE_HOURS",
                    DEFAULT_OVERDUE_INVOICE_COOLDOWN,
                ),
                upcoming_maintenance: hours_from_env(
                    "COOLDOWN_UPCOMING_MAINTENANCE_HOURS",
                    DEFAULT_UPCOMING_MAINTENANCE_COOLDOWN,
                ),
            },
            maintenance_lookahead_days,
        }
    }
}

fn hours_from_env(var: &str, default: Duration) -> Duration {
    let hours: u64 = match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{var} must be a valid number of hours")),
        Err(_) => default.as_secs() / 3600,
    };
    Duration::from_secs(hours * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_defaults() {
        let config = NotificationStoreConfig::default();
        assert_eq!(config.max_notifications, 5);
        assert_eq!(config.auto_remove_delay, Duration::from_secs(5));
    }

    #[test]
    fn watcher_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.maintenance_lookahead_days, 7);
        assert_eq!(config.cooldowns, CooldownPolicy::default());
    }

    #[test]
    fn hours_fall_back_to_default_when_unset() {
        let window = hours_from_env(
            "GESTORA_TEST_UNSET_COOLDOWN_HOURS",
            DEFAULT_OVERDUE_INVOICE_COOLDOWN,
        );
        assert_eq!(window, DEFAULT_OVERDUE_INVOICE_COOLDOWN);
    }
}
