//! Route definitions for the `/notifications` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /               -> list_notifications
/// POST   /               -> create_notification
/// DELETE /               -> clear_notifications
/// GET    /unread-count   -> unread_count
/// POST   /read-all       -> mark_all_read
/// DELETE /{id}           -> remove_notification
/// POST   /{id}/read      -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification::list_notifications)
                .post(notification::create_notification)
                .delete(notification::clear_notifications),
        )
        .route("/unread-count", get(notification::unread_count))
        .route("/read-all", post(notification::mark_all_read))
        .route("/{id}", delete(notification::remove_notification))
        .route("/{id}/read", post(notification::mark_read))
}
