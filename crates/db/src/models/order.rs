//! Order and order-item rows.

use gestora_core::records::{Order, OrderItem};
use gestora_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: DbId,
    pub order_number: Option<String>,
    pub client_id: Option<DbId>,
    pub status: String,
    pub total: f64,
    pub created_at: Timestamp,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            order_number: row.order_number,
            client_id: row.client_id,
            status: row.status,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub quantity: i32,
    pub price: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: i64::from(row.quantity),
            price: row.price,
        }
    }
}
