//! Handlers for the `/notifications` resource.
//!
//! Operations on unknown ids are not errors: removing or marking a missing
//! notification answers `204 No Content` just like a hit would.

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gestora_core::error::CoreError;
use gestora_core::notification::{
    Notification, NotificationAction, NotificationId, NotificationType, NotifyOptions,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// Request body for `POST /notifications`.
#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub message: String,
    /// One of `success`, `error`, `warning`, `info`, `system`. Defaults to `info`.
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub title: Option<String>,
    pub persistent: Option<bool>,
    /// Overrides the store-wide auto-removal delay. `0` disables removal.
    pub auto_remove_ms: Option<u64>,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
    pub metadata: Option<serde_json::Value>,
}

impl CreateNotification {
    fn into_parts(self) -> AppResult<(String, NotificationType, NotifyOptions)> {
        let message = self.message.trim().to_string();
        if message.is_empty() {
            return Err(CoreError::Validation("message must not be empty".into()).into());
        }

        let notification_type = match self.notification_type.as_deref() {
            Some(raw) => NotificationType::parse(raw)?,
            None => NotificationType::Info,
        };

        if let Some(metadata) = &self.metadata {
            if !metadata.is_object() {
                return Err(CoreError::Validation("metadata must be a JSON object".into()).into());
            }
        }

        let options = NotifyOptions {
            title: self.title,
            persistent: self.persistent,
            auto_remove_delay: self.auto_remove_ms.map(Duration::from_millis),
            actions: self.actions,
            metadata: self.metadata,
        };

        Ok((message, notification_type, options))
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: NotificationId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// Newest first, with the unread count alongside.
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> Json<DataResponse<NotificationList>> {
    let mut notifications = state.store.notifications();
    let unread_count = notifications.iter().filter(|n| !n.read).count();

    if params.unread_only.unwrap_or(false) {
        notifications.retain(|n| !n.read);
    }

    Json(DataResponse {
        data: NotificationList {
            notifications,
            unread_count,
        },
    })
}

/// POST /api/v1/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    let (message, notification_type, options) = input.into_parts()?;
    let id = state.store.add(message, notification_type, options).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: Created { id } })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "data": { "count": state.store.unread_count() }
    }))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> StatusCode {
    state.store.mark_as_read(id).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/notifications/read-all
///
/// Returns the number of notifications that changed.
pub async fn mark_all_read(State(state): State<AppState>) -> Json<serde_json::Value> {
    let count = state.store.mark_all_as_read().await;

    Json(serde_json::json!({
        "data": { "marked_read": count }
    }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn remove_notification(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> StatusCode {
    state.store.remove(id).await;
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/notifications
pub async fn clear_notifications(State(state): State<AppState>) -> Json<serde_json::Value> {
    let removed = state.store.clear_all().await;

    Json(serde_json::json!({
        "data": { "removed": removed }
    }))
}
