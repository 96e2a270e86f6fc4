use std::sync::Arc;

use gestora_events::{NotificationStore, SnapshotSource};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store is a channel handle and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Handle to the notification store actor.
    pub store: NotificationStore,
    /// Business data used by the report endpoint and the health check.
    pub source: Arc<dyn SnapshotSource>,
}
