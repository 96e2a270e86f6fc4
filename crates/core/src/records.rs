//! Plain entity records consumed by the watcher and the report aggregator.
//!
//! These mirror the rows the data-access layer hands out. Only the fields
//! referenced by alerting and reporting are modelled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Invoice status meaning the invoice has been settled.
pub const INVOICE_STATUS_PAID: &str = "paid";
/// Invoice status meaning the invoice was voided.
pub const INVOICE_STATUS_CANCELLED: &str = "cancelled";

/// Maintenance status for schedules that are still being followed.
pub const MAINTENANCE_STATUS_ACTIVE: &str = "active";

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: DbId,
    /// Human-facing order number; falls back to the id when absent.
    pub order_number: Option<String>,
    pub client_id: Option<DbId>,
    /// Raw status string (see [`crate::order_status`]).
    pub status: String,
    pub total: f64,
    pub created_at: Timestamp,
}

impl Order {
    /// Label used when naming the order in a message.
    pub fn display_number(&self) -> String {
        match &self.order_number {
            Some(number) if !number.trim().is_empty() => number.clone(),
            _ => self.id.to_string(),
        }
    }
}

/// A line item belonging to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    /// `None` for malformed rows; aggregation skips them.
    pub product_id: Option<DbId>,
    pub quantity: i64,
    pub price: f64,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Reorder threshold; [`crate::stock::DEFAULT_MIN_STOCK`] applies when absent.
    pub min_stock: Option<i64>,
}

/// Current stock level of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: DbId,
    pub product_id: DbId,
    pub quantity: i64,
}

/// A billing invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: DbId,
    pub invoice_number: String,
    pub client_id: Option<DbId>,
    pub status: String,
    pub total: f64,
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Whether the invoice still expects a payment.
    pub fn is_unpaid(&self) -> bool {
        self.status != INVOICE_STATUS_PAID && self.status != INVOICE_STATUS_CANCELLED
    }
}

/// A recurring maintenance schedule for a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub next_service_date: Option<NaiveDate>,
}

impl Maintenance {
    pub fn is_active(&self) -> bool {
        self.status == MAINTENANCE_STATUS_ACTIVE
    }
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_number_falls_back_to_id() {
        let mut order = Order {
            id: 42,
            order_number: None,
            client_id: None,
            status: "pending".into(),
            total: 0.0,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(order.display_number(), "42");

        order.order_number = Some("  ".into());
        assert_eq!(order.display_number(), "42");

        order.order_number = Some("PED-0042".into());
        assert_eq!(order.display_number(), "PED-0042");
    }

    #[test]
    fn paid_and_cancelled_invoices_are_not_unpaid() {
        let mut invoice = Invoice {
            id: 1,
            invoice_number: "F-1".into(),
            client_id: None,
            status: "pending".into(),
            total: 10.0,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(invoice.is_unpaid());

        invoice.status = INVOICE_STATUS_PAID.into();
        assert!(!invoice.is_unpaid());

        invoice.status = INVOICE_STATUS_CANCELLED.into();
        assert!(!invoice.is_unpaid());
    }
}
