//! Row models.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! a conversion into the corresponding `gestora_core::records` type. Money
//! columns are `NUMERIC` and are cast to `float8` in the repository queries.

pub mod client;
pub mod cooldown;
pub mod inventory;
pub mod invoice;
pub mod maintenance;
pub mod order;
pub mod product;
