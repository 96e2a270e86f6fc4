//! Invoice rows.

use chrono::NaiveDate;
use gestora_core::records::Invoice;
use gestora_core::types::DbId;
use sqlx::FromRow;

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: DbId,
    pub invoice_number: String,
    pub client_id: Option<DbId>,
    pub status: String,
    pub total: f64,
    pub due_date: NaiveDate,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: row.id,
            invoice_number: row.invoice_number,
            client_id: row.client_id,
            status: row.status,
            total: row.total,
            due_date: row.due_date,
        }
    }
}
