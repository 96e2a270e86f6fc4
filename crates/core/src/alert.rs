//! Business alert kinds, cooldown policy, and the alert record produced by
//! the detectors in [`crate::detection`].

use std::time::Duration;

use serde::Serialize;

use crate::notification::{NotificationType, NotifyOptions};
use crate::types::DbId;

/// Default suppression window for low-stock alerts.
pub const DEFAULT_INVENTORY_COOLDOWN: Duration = Duration::from_secs(12 * 3600);

/// Default suppression window for overdue-invoice alerts.
pub const DEFAULT_OVERDUE_INVOICE_COOLDOWN: Duration = Duration::from_secs(7 * 24 * 3600);

/// Default suppression window for upcoming-maintenance alerts.
pub const DEFAULT_UPCOMING_MAINTENANCE_COOLDOWN: Duration = Duration::from_secs(3 * 24 * 3600);

/// Default horizon, in days, for upcoming-maintenance alerts.
pub const DEFAULT_MAINTENANCE_LOOKAHEAD_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// AlertKind
// ---------------------------------------------------------------------------

/// The kind of business event an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    NewOrder,
    OrderStatusChange,
    InventoryAlert,
    OverdueInvoice,
    UpcomingMaintenance,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewOrder => "new_order",
            Self::OrderStatusChange => "order_status_change",
            Self::InventoryAlert => "inventory_alert",
            Self::OverdueInvoice => "overdue_invoice",
            Self::UpcomingMaintenance => "upcoming_maintenance",
        }
    }

    /// Composite cooldown key, e.g. `inventory_alert:17`.
    pub fn cooldown_key(&self, entity_id: DbId) -> String {
        format!("{}:{entity_id}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CooldownPolicy
// ---------------------------------------------------------------------------

/// Per-kind suppression windows.
///
/// Order creation and status transitions are inherently non-repeating and
/// have no window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub inventory: Duration,
    pub overdue_invoice: Duration,
    pub upcoming_maintenance: Duration,
}

impl CooldownPolicy {
    /// The window for `kind`, or `None` when the kind is never gated.
    pub fn window(&self, kind: AlertKind) -> Option<Duration> {
        match kind {
            AlertKind::NewOrder | AlertKind::OrderStatusChange => None,
            AlertKind::InventoryAlert => Some(self.inventory),
            AlertKind::OverdueInvoice => Some(self.overdue_invoice),
            AlertKind::UpcomingMaintenance => Some(self.upcoming_maintenance),
        }
    }

    /// The longest configured window.
    pub fn longest_window(&self) -> Duration {
        self.inventory
            .max(self.overdue_invoice)
            .max(self.upcoming_maintenance)
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            inventory: DEFAULT_INVENTORY_COOLDOWN,
            overdue_invoice: DEFAULT_OVERDUE_INVOICE_COOLDOWN,
            upcoming_maintenance: DEFAULT_UPCOMING_MAINTENANCE_COOLDOWN,
        }
    }
}

// ---------------------------------------------------------------------------
// BusinessAlert
// ---------------------------------------------------------------------------

/// A detected business event, ready to become a notification.
#[derive(Debug, Clone)]
pub struct BusinessAlert {
    pub kind: AlertKind,
    /// Entity the alert is about; part of the cooldown key.
    pub entity_id: DbId,
    pub notification_type: NotificationType,
    pub message: String,
    pub options: NotifyOptions,
}

impl BusinessAlert {
    pub fn cooldown_key(&self) -> String {
        self.kind.cooldown_key(self.entity_id)
    }
}
