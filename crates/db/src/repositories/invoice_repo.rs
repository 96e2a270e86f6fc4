//! Repository for the `invoices` table.

use gestora_core::records::Invoice;
use sqlx::PgPool;

use crate::models::invoice::InvoiceRow;

/// Column list for `invoices` queries.
const COLUMNS: &str = "id, invoice_number, client_id, status, total::float8 AS total, due_date";

/// Provides read access to invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// List every invoice ordered by due date.
    pub async fn list(pool: &PgPool) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices ORDER BY due_date, id");
        let rows = sqlx::query_as::<_, InvoiceRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Invoice::from).collect())
    }
}
