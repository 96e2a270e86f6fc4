//! Product rows.

use gestora_core::records::Product;
use gestora_core::types::DbId;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub min_stock: Option<i32>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            min_stock: row.min_stock.map(i64::from),
        }
    }
}
