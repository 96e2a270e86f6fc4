//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod cooldown_repo;
pub mod inventory_repo;
pub mod invoice_repo;
pub mod maintenance_repo;
pub mod order_repo;
pub mod product_repo;

pub use client_repo::ClientRepo;
pub use cooldown_repo::CooldownRepo;
pub use inventory_repo::InventoryRepo;
pub use invoice_repo::InvoiceRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
