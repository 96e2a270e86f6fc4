//! Route tree.
//!
//! ```text
//! /health                                  service health (root level)
//!
//! /api/v1/notifications                    list (?unread_only), create (POST), clear (DELETE)
//! /api/v1/notifications/unread-count       unread count (GET)
//! /api/v1/notifications/read-all           mark all read (POST)
//! /api/v1/notifications/{id}               remove (DELETE)
//! /api/v1/notifications/{id}/read          mark read (POST)
//!
//! /api/v1/reports/summary                  summary (?metrics, start_date, end_date, limit)
//! ```

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod notification;
pub mod report;

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notifications", notification::router())
        .nest("/reports", report::router())
}
