//! Order status constants and their display labels.
//!
//! Status strings are stored verbatim in the `orders.status` column. The
//! label table is what users see in status-change notifications.

use crate::notification::NotificationType;

pub const ORDER_STATUS_PENDING: &str = "pending";
pub const ORDER_STATUS_CONFIRMED: &str = "confirmed";
pub const ORDER_STATUS_IN_PROGRESS: &str = "in_progress";
pub const ORDER_STATUS_COMPLETED: &str = "completed";
pub const ORDER_STATUS_CANCELLED: &str = "cancelled";
pub const ORDER_STATUS_DELIVERED: &str = "delivered";

/// Display label for a status, falling back to the raw string.
pub fn status_label(status: &str) -> &str {
    match status {
        ORDER_STATUS_CONFIRMED => "confirmado",
        ORDER_STATUS_IN_PROGRESS => "en progreso",
        ORDER_STATUS_COMPLETED => "completado",
        ORDER_STATUS_CANCELLED => "cancelado",
        ORDER_STATUS_DELIVERED => "entregado",
        other => other,
    }
}

/// Notification type announcing a transition into `status`.
///
/// Reaching a terminal success state is a `success`; everything else is `info`.
pub fn transition_notification_type(status: &str) -> NotificationType {
    match status {
        ORDER_STATUS_COMPLETED | ORDER_STATUS_DELIVERED => NotificationType::Success,
        _ => NotificationType::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_labels() {
        assert_eq!(status_label("confirmed"), "confirmado");
        assert_eq!(status_label("in_progress"), "en progreso");
        assert_eq!(status_label("completed"), "completado");
        assert_eq!(status_label("cancelled"), "cancelado");
        assert_eq!(status_label("delivered"), "entregado");
    }

    #[test]
    fn unknown_status_falls_back_to_raw_string() {
        assert_eq!(status_label("on_hold"), "on_hold");
        assert_eq!(status_label(ORDER_STATUS_PENDING), "pending");
    }

    #[test]
    fn completion_statuses_are_success() {
        assert_eq!(
            transition_notification_type(ORDER_STATUS_COMPLETED),
            NotificationType::Success
        );
        assert_eq!(
            transition_notification_type(ORDER_STATUS_DELIVERED),
            NotificationType::Success
        );
        assert_eq!(
            transition_notification_type(ORDER_STATUS_CANCELLED),
            NotificationType::Info
        );
    }
}
