//! Repository for the `maintenances` table.

use gestora_core::records::Maintenance;
use sqlx::PgPool;

use crate::models::maintenance::MaintenanceRow;

/// Column list for `maintenances` queries.
const COLUMNS: &str = "id, title, status, next_service_date";

/// Provides read access to maintenance schedules.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// List every maintenance schedule.
    pub async fn list(pool: &PgPool) -> Result<Vec<Maintenance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenances ORDER BY next_service_date NULLS LAST, id");
        let rows = sqlx::query_as::<_, MaintenanceRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Maintenance::from).collect())
    }
}
