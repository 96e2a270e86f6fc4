//! Business-event watcher.
//!
//! Each call to [`BusinessEventWatcher::observe`] takes one [`Snapshot`],
//! runs the pure detectors from `gestora_core::detection` against it and
//! the retained state, and pushes the resulting alerts into the
//! [`NotificationStore`]. Repeating alert kinds pass through the
//! [`CooldownRegistry`] first.
//!
//! Order creation and status changes are found by diffing against the
//! previous order snapshot. The very first successful snapshot only seeds
//! that state, so existing orders are not reported as new on startup.
//! Inventory is likewise left unchecked until products have been fetched
//! once, since stock minimums live on the product.

use gestora_core::alert::BusinessAlert;
use gestora_core::detection::{
    detect_low_stock, detect_order_changes, detect_overdue_invoices, detect_upcoming_maintenance,
    order_statuses, OrderStatuses,
};
use gestora_core::records::{Client, Product};
use gestora_core::types::Timestamp;

use crate::config::WatcherConfig;
use crate::cooldown::CooldownRegistry;
use crate::source::Snapshot;
use crate::store::NotificationStore;

/// Outcome of one observation, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub emitted: usize,
    pub suppressed: usize,
}

/// Turns successive snapshots into notifications.
pub struct BusinessEventWatcher {
    store: NotificationStore,
    cooldowns: CooldownRegistry,
    config: WatcherConfig,
    /// `None` until the first successful orders fetch.
    previous_orders: Option<OrderStatuses>,
    clients: Vec<Client>,
    /// `None` until the first successful products fetch; inventory is not
    /// checked before then.
    products: Option<Vec<Product>>,
}

impl BusinessEventWatcher {
    pub fn new(store: NotificationStore, cooldowns: CooldownRegistry, config: WatcherConfig) -> Self {
        Self {
            store,
            cooldowns,
            config,
            previous_orders: None,
            clients: Vec::new(),
            products: None,
        }
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Process one snapshot taken at `now`.
    ///
    /// A collection missing from the snapshot leaves the retained state for
    /// it untouched and skips its checks for this tick.
    pub async fn observe(&mut self, snapshot: Snapshot, now: Timestamp) -> TickReport {
        let mut report = TickReport::default();

        if let Some(clients) = snapshot.clients {
            self.clients = clients;
        }
        if let Some(products) = snapshot.products {
            self.products = Some(products);
        }

        if let Some(orders) = snapshot.orders {
            if let Some(previous) = &self.previous_orders {
                for alert in detect_order_changes(previous, &orders, &self.clients) {
                    self.emit(alert).await;
                    report.emitted += 1;
                }
            } else {
                tracing::debug!(count = orders.len(), "Seeded order snapshot");
            }
            self.previous_orders = Some(order_statuses(&orders));
        }

        if let (Some(inventory), Some(products)) = (snapshot.inventory, &self.products) {
            for alert in detect_low_stock(&inventory, products) {
                self.emit_gated(alert, now, &mut report).await;
            }
        }

        if let Some(invoices) = snapshot.invoices {
            for alert in detect_overdue_invoices(&invoices, now) {
                self.emit_gated(alert, now, &mut report).await;
            }
        }

        if let Some(maintenances) = snapshot.maintenances {
            let alerts = detect_upcoming_maintenance(
                &maintenances,
                now.date_naive(),
                self.config.maintenance_lookahead_days,
            );
            for alert in alerts {
                self.emit_gated(alert, now, &mut report).await;
            }
        }

        report
    }

    async fn emit_gated(&self, alert: BusinessAlert, now: Timestamp, report: &mut TickReport) {
        let Some(window) = self.config.cooldowns.window(alert.kind) else {
            self.emit(alert).await;
            report.emitted += 1;
            return;
        };

        let key = alert.cooldown_key();
        if !self.cooldowns.should_notify(&key, window, now).await {
            report.suppressed += 1;
            return;
        }

        self.emit(alert).await;
        report.emitted += 1;

        if let Err(e) = self.cooldowns.record_notified(&key, now).await {
            tracing::warn!(key = %key, error = %e, "Failed to record cooldown");
        }
    }

    async fn emit(&self, alert: BusinessAlert) {
        tracing::debug!(
            kind = alert.kind.as_str(),
            entity_id = alert.entity_id,
            "Emitting business alert"
        );
        self.store
            .add(alert.message, alert.notification_type, alert.options)
            .await;
    }
}
