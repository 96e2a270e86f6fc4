//! Client rows.

use gestora_core::records::Client;
use gestora_core::types::DbId;
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}
