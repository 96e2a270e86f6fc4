//! Business event detectors.
//!
//! Pure logic -- no storage, no cooldown state. Each detector inspects the
//! current records (and, for orders, the previous statuses) and returns every
//! alert whose condition holds. Throttling is the caller's job.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::alert::{AlertKind, BusinessAlert};
use crate::notification::{ActionKind, NotificationAction, NotificationType, NotifyOptions};
use crate::order_status::{status_label, transition_notification_type};
use crate::records::{Client, InventoryItem, Invoice, Maintenance, Order, Product};
use crate::stock::{classify, effective_min_stock, StockStatus};
use crate::types::{DbId, Timestamp};

/// Name used when an order's client cannot be resolved.
const UNKNOWN_CLIENT: &str = "cliente desconocido";

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Status of each order in a snapshot, keyed by id.
pub type OrderStatuses = HashMap<DbId, String>;

/// Index a snapshot of orders by id.
pub fn order_statuses(orders: &[Order]) -> OrderStatuses {
    orders
        .iter()
        .map(|o| (o.id, o.status.clone()))
        .collect()
}

/// Diff `current` against the previous snapshot's statuses.
///
/// Orders absent from `previous` produce a [`AlertKind::NewOrder`] alert;
/// orders whose status changed produce an [`AlertKind::OrderStatusChange`].
pub fn detect_order_changes(
    previous: &OrderStatuses,
    current: &[Order],
    clients: &[Client],
) -> Vec<BusinessAlert> {
    let client_names: HashMap<DbId, &str> =
        clients.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut alerts = Vec::new();
    for order in current {
        match previous.get(&order.id) {
            None => {
                let client = order
                    .client_id
                    .and_then(|id| client_names.get(&id).copied())
                    .unwrap_or(UNKNOWN_CLIENT);
                alerts.push(new_order_alert(order, client));
            }
            Some(prev_status) if *prev_status != order.status => {
                alerts.push(status_change_alert(order, prev_status));
            }
            Some(_) => {}
        }
    }
    alerts
}

fn new_order_alert(order: &Order, client_name: &str) -> BusinessAlert {
    let options = NotifyOptions::default()
        .with_title("Nuevo pedido")
        .with_metadata(json!({
            "type": AlertKind::NewOrder.as_str(),
            "order_id": order.id,
            "client_id": order.client_id,
            "total": order.total,
        }));

    BusinessAlert {
        kind: AlertKind::NewOrder,
        entity_id: order.id,
        notification_type: NotificationType::Success,
        message: format!(
            "Pedido #{} recibido de {client_name}",
            order.display_number()
        ),
        options,
    }
}

fn status_change_alert(order: &Order, previous_status: &str) -> BusinessAlert {
    let options = NotifyOptions::default()
        .with_title("Pedido actualizado")
        .with_metadata(json!({
            "type": AlertKind::OrderStatusChange.as_str(),
            "order_id": order.id,
            "previous_status": previous_status,
            "status": order.status,
        }));

    BusinessAlert {
        kind: AlertKind::OrderStatusChange,
        entity_id: order.id,
        notification_type: transition_notification_type(&order.status),
        message: format!(
            "El pedido #{} ahora está {}",
            order.display_number(),
            status_label(&order.status)
        ),
        options,
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// One alert per inventory row at or below its product's minimum stock.
///
/// Rows referencing an unknown product are skipped.
pub fn detect_low_stock(inventory: &[InventoryItem], products: &[Product]) -> Vec<BusinessAlert> {
    let products: HashMap<DbId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    inventory
        .iter()
        .filter_map(|item| {
            let product = products.get(&item.product_id)?;
            let status = classify(item.quantity, product.min_stock)?;
            Some(low_stock_alert(
                item,
                &product.name,
                effective_min_stock(product.min_stock),
                status,
            ))
        })
        .collect()
}

fn low_stock_alert(
    item: &InventoryItem,
    product_name: &str,
    min_stock: i64,
    status: StockStatus,
) -> BusinessAlert {
    let (notification_type, title, message) = match status {
        StockStatus::Critical => (
            NotificationType::Error,
            "Producto agotado",
            format!("{product_name} está agotado"),
        ),
        StockStatus::Warning => (
            NotificationType::Warning,
            "Stock bajo",
            format!(
                "{product_name} tiene stock bajo ({} unidades, mínimo {min_stock})",
                item.quantity
            ),
        ),
    };

    let options = NotifyOptions::default()
        .with_title(title)
        .persistent(true)
        .with_action(NotificationAction::primary(
            "Ver inventario",
            ActionKind::ViewInventory {
                product_id: item.product_id,
            },
        ))
        .with_metadata(json!({
            "type": AlertKind::InventoryAlert.as_str(),
            "product_id": item.product_id,
            "current_stock": item.quantity,
            "min_stock": min_stock,
            "severity": status.as_str(),
        }));

    BusinessAlert {
        kind: AlertKind::InventoryAlert,
        entity_id: item.id,
        notification_type,
        message,
        options,
    }
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// Whole days an invoice is past due at `now`, or `None` if not yet due.
///
/// The due date is taken to fall due at 00:00 UTC.
pub fn days_past_due(due_date: NaiveDate, now: Timestamp) -> Option<i64> {
    let due = due_date.and_time(NaiveTime::MIN).and_utc();
    if due < now {
        Some((now - due).num_days())
    } else {
        None
    }
}

/// One alert per unpaid invoice whose due date has passed.
pub fn detect_overdue_invoices(invoices: &[Invoice], now: Timestamp) -> Vec<BusinessAlert> {
    invoices
        .iter()
        .filter(|invoice| invoice.is_unpaid())
        .filter_map(|invoice| {
            let days = days_past_due(invoice.due_date, now)?;
            Some(overdue_invoice_alert(invoice, days))
        })
        .collect()
}

fn overdue_invoice_alert(invoice: &Invoice, days: i64) -> BusinessAlert {
    let options = NotifyOptions::default()
        .with_title("Factura vencida")
        .persistent(true)
        .with_action(NotificationAction::primary(
            "Ver factura",
            ActionKind::ViewInvoice {
                invoice_id: invoice.id,
            },
        ))
        .with_metadata(json!({
            "type": AlertKind::OverdueInvoice.as_str(),
            "invoice_id": invoice.id,
            "client_id": invoice.client_id,
            "days_past_due": days,
        }));

    BusinessAlert {
        kind: AlertKind::OverdueInvoice,
        entity_id: invoice.id,
        notification_type: NotificationType::Warning,
        message: format!(
            "La factura {} está vencida hace {}",
            invoice.invoice_number,
            day_count(days)
        ),
        options,
    }
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

/// One alert per active maintenance due within `lookahead_days` of `today`
/// (both ends inclusive).
pub fn detect_upcoming_maintenance(
    maintenances: &[Maintenance],
    today: NaiveDate,
    lookahead_days: i64,
) -> Vec<BusinessAlert> {
    maintenances
        .iter()
        .filter(|m| m.is_active())
        .filter_map(|m| {
            let days = (m.next_service_date? - today).num_days();
            (0..=lookahead_days)
                .contains(&days)
                .then(|| upcoming_maintenance_alert(m, days))
        })
        .collect()
}

fn upcoming_maintenance_alert(maintenance: &Maintenance, days: i64) -> BusinessAlert {
    let notification_type = if days <= 1 {
        NotificationType::Warning
    } else {
        NotificationType::Info
    };
    let when = if days == 0 {
        "hoy".to_string()
    } else {
        format!("en {}", day_count(days))
    };

    let options = NotifyOptions::default()
        .with_title("Mantenimiento próximo")
        .persistent(true)
        .with_action(NotificationAction::primary(
            "Ver mantenimiento",
            ActionKind::ViewMaintenance {
                maintenance_id: maintenance.id,
            },
        ))
        .with_metadata(json!({
            "type": AlertKind::UpcomingMaintenance.as_str(),
            "maintenance_id": maintenance.id,
            "days_until_service": days,
        }));

    BusinessAlert {
        kind: AlertKind::UpcomingMaintenance,
        entity_id: maintenance.id,
        notification_type,
        message: format!("{} requiere servicio {when}", maintenance.title),
        options,
    }
}

fn day_count(days: i64) -> String {
    if days == 1 {
        "1 día".to_string()
    } else {
        format!("{days} días")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn order(id: DbId, status: &str) -> Order {
        Order {
            id,
            order_number: Some(format!("PED-{id}")),
            client_id: Some(1),
            status: status.to_string(),
            total: 120.0,
            created_at: Utc::now(),
        }
    }

    fn clients() -> Vec<Client> {
        vec![Client {
            id: 1,
            name: "Ferretería Sol".into(),
            email: None,
        }]
    }

    fn maintenance(id: DbId, status: &str, next: Option<NaiveDate>) -> Maintenance {
        Maintenance {
            id,
            title: format!("Compresor {id}"),
            status: status.into(),
            next_service_date: next,
        }
    }

    fn invoice(id: DbId, status: &str, due: NaiveDate) -> Invoice {
        Invoice {
            id,
            invoice_number: format!("F-{id}"),
            client_id: Some(1),
            status: status.into(),
            total: 300.0,
            due_date: due,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_order_names_client() {
        let previous = order_statuses(&[order(1, "pending")]);
        let current = vec![order(1, "pending"), order(2, "pending")];

        let alerts = detect_order_changes(&previous, &current, &clients());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::NewOrder);
        assert_eq!(alerts[0].entity_id, 2);
        assert_eq!(alerts[0].notification_type, NotificationType::Success);
        assert!(alerts[0].message.contains("Ferretería Sol"));
        let meta = alerts[0].options.metadata.as_ref().unwrap();
        assert_eq!(meta["type"], "new_order");
        assert_eq!(meta["order_id"], 2);
        assert_eq!(meta["client_id"], 1);
    }

    #[test]
    fn new_order_with_unknown_client_uses_fallback_name() {
        let mut o = order(5, "pending");
        o.client_id = Some(99);
        let alerts = detect_order_changes(&OrderStatuses::new(), &[o], &clients());
        assert!(alerts[0].message.contains(UNKNOWN_CLIENT));
    }

    #[test]
    fn status_change_uses_label_and_severity() {
        let previous = order_statuses(&[order(1, "in_progress"), order(2, "pending")]);
        let current = vec![order(1, "delivered"), order(2, "confirmed")];

        let alerts = detect_order_changes(&previous, &current, &clients());
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].kind, AlertKind::OrderStatusChange);
        assert_eq!(alerts[0].notification_type, NotificationType::Success);
        assert!(alerts[0].message.contains("entregado"));

        assert_eq!(alerts[1].notification_type, NotificationType::Info);
        assert!(alerts[1].message.contains("confirmado"));
    }

    #[test]
    fn unchanged_orders_produce_nothing() {
        let snapshot = vec![order(1, "pending"), order(2, "completed")];
        let alerts = detect_order_changes(&order_statuses(&snapshot), &snapshot, &clients());
        assert!(alerts.is_empty());
    }

    #[test]
    fn low_stock_severity_follows_quantity() {
        let products = vec![Product {
            id: 10,
            name: "Tornillos".into(),
            min_stock: Some(5),
        }];
        let inventory = vec![
            InventoryItem { id: 1, product_id: 10, quantity: 0 },
            InventoryItem { id: 2, product_id: 10, quantity: 3 },
            InventoryItem { id: 3, product_id: 10, quantity: 6 },
        ];

        let alerts = detect_low_stock(&inventory, &products);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].entity_id, 1);
        assert_eq!(alerts[0].notification_type, NotificationType::Error);
        assert!(alerts[0].message.contains("agotado"));
        assert_eq!(alerts[0].options.persistent, Some(true));
        let meta = alerts[0].options.metadata.as_ref().unwrap();
        assert_eq!(meta["severity"], "critical");
        assert_eq!(meta["product_id"], 10);

        assert_eq!(alerts[1].entity_id, 2);
        assert_eq!(alerts[1].notification_type, NotificationType::Warning);
        assert!(alerts[1].message.contains("stock bajo"));
        assert_eq!(alerts[1].cooldown_key(), "inventory_alert:2");
    }

    #[test]
    fn low_stock_skips_unknown_products() {
        let inventory = vec![InventoryItem { id: 1, product_id: 77, quantity: 4 }];
        assert!(detect_low_stock(&inventory, &[]).is_empty());
    }

    #[test]
    fn low_stock_without_min_uses_default_minimum() {
        let products = vec![Product {
            id: 77,
            name: "Arandelas".into(),
            min_stock: None,
        }];
        let inventory = vec![InventoryItem { id: 1, product_id: 77, quantity: 4 }];
        let alerts = detect_low_stock(&inventory, &products);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].options.metadata.as_ref().unwrap()["min_stock"], 5);
    }

    #[test]
    fn days_past_due_floors_partial_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap();
        assert_eq!(days_past_due(date(2024, 3, 15), now), Some(0));
        assert_eq!(days_past_due(date(2024, 3, 14), now), Some(1));
        assert_eq!(days_past_due(date(2024, 3, 1), now), Some(14));
        assert_eq!(days_past_due(date(2024, 3, 16), now), None);
    }

    #[test]
    fn overdue_invoices_skip_paid_and_future() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let invoices = vec![
            invoice(1, "pending", date(2024, 3, 10)),
            invoice(2, "paid", date(2024, 3, 10)),
            invoice(3, "pending", date(2024, 3, 20)),
        ];

        let alerts = detect_overdue_invoices(&invoices, now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].cooldown_key(), "overdue_invoice:1");
        assert_eq!(alerts[0].notification_type, NotificationType::Warning);
        assert!(alerts[0].message.contains("F-1"));
        assert!(alerts[0].message.contains("5 días"));
    }

    #[test]
    fn upcoming_maintenance_window_is_inclusive() {
        let today = date(2024, 3, 15);
        let maintenances = vec![
            maintenance(1, "active", Some(date(2024, 3, 15))),
            maintenance(2, "active", Some(date(2024, 3, 16))),
            maintenance(3, "active", Some(date(2024, 3, 22))),
            maintenance(4, "active", Some(date(2024, 3, 23))),
            maintenance(5, "active", Some(date(2024, 3, 14))),
            maintenance(6, "inactive", Some(date(2024, 3, 16))),
            maintenance(7, "active", None),
        ];

        let alerts = detect_upcoming_maintenance(&maintenances, today, 7);
        let ids: Vec<DbId> = alerts.iter().map(|a| a.entity_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert!(alerts[0].message.ends_with("hoy"));
        assert_eq!(alerts[0].notification_type, NotificationType::Warning);
        assert!(alerts[1].message.ends_with("en 1 día"));
        assert_eq!(alerts[1].notification_type, NotificationType::Warning);
        assert!(alerts[2].message.ends_with("en 7 días"));
        assert_eq!(alerts[2].notification_type, NotificationType::Info);
    }
}
