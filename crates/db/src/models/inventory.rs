//! Inventory rows.

use gestora_core::records::InventoryItem;
use gestora_core::types::DbId;
use sqlx::FromRow;

/// A row from the `inventory` table.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryRow {
    pub id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity: i64::from(row.quantity),
        }
    }
}
