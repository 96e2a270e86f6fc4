//! Repository for the `products` table.

use gestora_core::records::Product;
use sqlx::PgPool;

use crate::models::product::ProductRow;

/// Column list for `products` queries.
const COLUMNS: &str = "id, name, min_stock";

/// Provides read access to products.
pub struct ProductRepo;

impl ProductRepo {
    /// List every product ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY name");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
