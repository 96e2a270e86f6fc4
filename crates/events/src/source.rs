//! Where the watcher and the report endpoint get their data.
//!
//! [`SnapshotSource`] fetches one collection per call. [`Snapshot::fetch`]
//! pulls every collection concurrently and keeps going when one fails: the
//! failed collection is simply absent from that snapshot.

use async_trait::async_trait;
use gestora_core::records::{Client, InventoryItem, Invoice, Maintenance, Order, OrderItem, Product};
use gestora_db::repositories::{
    ClientRepo, InventoryRepo, InvoiceRepo, MaintenanceRepo, OrderRepo, ProductRepo,
};
use gestora_db::DbPool;
use tokio::sync::RwLock;

use crate::error::SourceError;

/// Read access to the business collections.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn orders(&self) -> Result<Vec<Order>, SourceError>;

    async fn order_items(&self) -> Result<Vec<OrderItem>, SourceError>;

    async fn products(&self) -> Result<Vec<Product>, SourceError>;

    async fn inventory(&self) -> Result<Vec<InventoryItem>, SourceError>;

    async fn invoices(&self) -> Result<Vec<Invoice>, SourceError>;

    async fn maintenances(&self) -> Result<Vec<Maintenance>, SourceError>;

    async fn clients(&self) -> Result<Vec<Client>, SourceError>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> Result<(), SourceError>;
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One fetch of every collection. `None` means that fetch failed.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub orders: Option<Vec<Order>>,
    pub order_items: Option<Vec<OrderItem>>,
    pub products: Option<Vec<Product>>,
    pub inventory: Option<Vec<InventoryItem>>,
    pub invoices: Option<Vec<Invoice>>,
    pub maintenances: Option<Vec<Maintenance>>,
    pub clients: Option<Vec<Client>>,
}

impl Snapshot {
    /// Fetch every collection concurrently, logging each failure.
    pub async fn fetch(source: &dyn SnapshotSource) -> Self {
        let (orders, order_items, products, inventory, invoices, maintenances, clients) = tokio::join!(
            source.orders(),
            source.order_items(),
            source.products(),
            source.inventory(),
            source.invoices(),
            source.maintenances(),
            source.clients(),
        );

        Self {
            orders: keep("orders", orders),
            order_items: keep("order_items", order_items),
            products: keep("products", products),
            inventory: keep("inventory", inventory),
            invoices: keep("invoices", invoices),
            maintenances: keep("maintenances", maintenances),
            clients: keep("clients", clients),
        }
    }
}

fn keep<T>(collection: &'static str, result: Result<Vec<T>, SourceError>) -> Option<Vec<T>> {
    match result {
        Ok(rows) => Some(rows),
        Err(e) => {
            tracing::warn!(collection, error = %e, "Snapshot fetch failed; collection skipped");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// PgSnapshotSource
// ---------------------------------------------------------------------------

/// Source reading straight from PostgreSQL through the repositories.
#[derive(Debug, Clone)]
pub struct PgSnapshotSource {
    pool: DbPool,
}

impl PgSnapshotSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotSource {
    async fn orders(&self) -> Result<Vec<Order>, SourceError> {
        Ok(OrderRepo::list(&self.pool).await?)
    }

    async fn order_items(&self) -> Result<Vec<OrderItem>, SourceError> {
        Ok(OrderRepo::list_items(&self.pool).await?)
    }

    async fn products(&self) -> Result<Vec<Product>, SourceError> {
        Ok(ProductRepo::list(&self.pool).await?)
    }

    async fn inventory(&self) -> Result<Vec<InventoryItem>, SourceError> {
        Ok(InventoryRepo::list(&self.pool).await?)
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, SourceError> {
        Ok(InvoiceRepo::list(&self.pool).await?)
    }

    async fn maintenances(&self) -> Result<Vec<Maintenance>, SourceError> {
        Ok(MaintenanceRepo::list(&self.pool).await?)
    }

    async fn clients(&self) -> Result<Vec<Client>, SourceError> {
        Ok(ClientRepo::list(&self.pool).await?)
    }

    async fn health_check(&self) -> Result<(), SourceError> {
        gestora_db::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// InMemorySource
// ---------------------------------------------------------------------------

/// Mutable in-process source for tests and demos.
///
/// Collections set to `None` fail with [`SourceError::Unavailable`].
#[derive(Debug, Default)]
pub struct InMemorySource {
    data: RwLock<Snapshot>,
}

impl InMemorySource {
    /// A source where every collection is present and empty.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot {
            orders: Some(Vec::new()),
            order_items: Some(Vec::new()),
            products: Some(Vec::new()),
            inventory: Some(Vec::new()),
            invoices: Some(Vec::new()),
            maintenances: Some(Vec::new()),
            clients: Some(Vec::new()),
        })
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }

    /// Apply `f` to the stored collections.
    pub async fn update(&self, f: impl FnOnce(&mut Snapshot)) {
        f(&mut *self.data.write().await);
    }

    async fn read<T: Clone>(
        &self,
        collection: &'static str,
        pick: impl FnOnce(&Snapshot) -> &Option<Vec<T>>,
    ) -> Result<Vec<T>, SourceError> {
        let data = self.data.read().await;
        pick(&data)
            .clone()
            .ok_or_else(|| SourceError::Unavailable(format!("{collection} unavailable")))
    }
}

#[async_trait]
impl SnapshotSource for InMemorySource {
    async fn orders(&self) -> Result<Vec<Order>, SourceError> {
        self.read("orders", |s| &s.orders).await
    }

    async fn order_items(&self) -> Result<Vec<OrderItem>, SourceError> {
        self.read("order_items", |s| &s.order_items).await
    }

    async fn products(&self) -> Result<Vec<Product>, SourceError> {
        self.read("products", |s| &s.products).await
    }

    async fn inventory(&self) -> Result<Vec<InventoryItem>, SourceError> {
        self.read("inventory", |s| &s.inventory).await
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, SourceError> {
        self.read("invoices", |s| &s.invoices).await
    }

    async fn maintenances(&self) -> Result<Vec<Maintenance>, SourceError> {
        self.read("maintenances", |s| &s.maintenances).await
    }

    async fn clients(&self) -> Result<Vec<Client>, SourceError> {
        self.read("clients", |s| &s.clients).await
    }

    async fn health_check(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("P{id}"),
            min_stock: None,
        }
    }

    #[tokio::test]
    async fn fetch_keeps_successful_collections_when_one_fails() {
        let source = InMemorySource::new();
        source
            .update(|s| {
                s.products = Some(vec![product(1), product(2)]);
                s.orders = None;
            })
            .await;

        let snapshot = Snapshot::fetch(&source).await;
        assert!(snapshot.orders.is_none());
        assert_eq!(snapshot.products.map(|p| p.len()), Some(2));
        assert_eq!(snapshot.clients, Some(Vec::new()));
    }
}
