//! Repository for the `inventory` table.

use gestora_core::records::InventoryItem;
use sqlx::PgPool;

use crate::models::inventory::InventoryRow;

/// Column list for `inventory` queries.
const COLUMNS: &str = "id, product_id, quantity";

/// Provides read access to stock levels.
pub struct InventoryRepo;

impl InventoryRepo {
    /// List every inventory row.
    pub async fn list(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory ORDER BY id");
        let rows = sqlx::query_as::<_, InventoryRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }
}
