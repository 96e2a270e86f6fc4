//! Maintenance schedule rows.

use chrono::NaiveDate;
use gestora_core::records::Maintenance;
use gestora_core::types::DbId;
use sqlx::FromRow;

/// A row from the `maintenances` table.
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceRow {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub next_service_date: Option<NaiveDate>,
}

impl From<MaintenanceRow> for Maintenance {
    fn from(row: MaintenanceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            status: row.status,
            next_service_date: row.next_service_date,
        }
    }
}
