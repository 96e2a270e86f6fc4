//! Error types for the storage and data-source seams.
//!
//! Neither error escapes the subsystem: cooldown reads fail open and a
//! failed fetch simply means "no new snapshot" for that collection. They
//! exist so the failures can be logged with their cause.

/// Failure reading or writing the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Key-value store unavailable: {0}")]
    Unavailable(String),
}

/// Failure fetching a collection from the data-access layer.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}
