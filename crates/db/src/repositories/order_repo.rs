//! Repository for the `orders` and `order_items` tables.

use gestora_core::records::{Order, OrderItem};
use sqlx::PgPool;

use crate::models::order::{OrderItemRow, OrderRow};

/// Column list for `orders` queries.
const ORDER_COLUMNS: &str = "id, order_number, client_id, status, total::float8 AS total, created_at";

/// Column list for `order_items` queries.
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price::float8 AS price";

/// Provides read access to orders and their line items.
pub struct OrderRepo;

impl OrderRepo {
    /// List every order, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// List every order line item.
    pub async fn list_items(pool: &PgPool) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items ORDER BY id");
        let rows = sqlx::query_as::<_, OrderItemRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }
}
