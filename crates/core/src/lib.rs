//! Pure domain logic for the gestora business-alerting subsystem.
//!
//! Nothing in this crate performs I/O. Callers fetch records from the
//! database (or any other source) and pass them in, which keeps every rule
//! here testable in isolation.

pub mod alert;
pub mod detection;
pub mod error;
pub mod notification;
pub mod order_status;
pub mod records;
pub mod report;
pub mod stock;
pub mod types;
