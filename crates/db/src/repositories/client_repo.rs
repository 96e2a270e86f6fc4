//! Repository for the `clients` table.

use gestora_core::records::Client;
use sqlx::PgPool;

use crate::models::client::ClientRow;

/// Column list for `clients` queries.
const COLUMNS: &str = "id, name, email";

/// Provides read access to clients.
pub struct ClientRepo;

impl ClientRepo {
    /// List every client ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name");
        let rows = sqlx::query_as::<_, ClientRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Client::from).collect())
    }
}
