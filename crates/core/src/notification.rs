//! Notification records and the options used to create them.
//!
//! A [`Notification`] carries no executable code: its actions are tagged
//! [`ActionKind`] references that the UI layer resolves to handlers, so a
//! record can be serialized, logged, and compared freely.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Identifier assigned by the notification store.
pub type NotificationId = Uuid;

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Error,
    Warning,
    Info,
    System,
}

/// All valid notification type names.
pub const VALID_NOTIFICATION_TYPES: &[&str] = &["success", "error", "warning", "info", "system"];

impl NotificationType {
    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::System => "system",
        }
    }

    /// Parse from a string, returning an error for unknown types.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "system" => Ok(Self::System),
            other => Err(CoreError::Validation(format!(
                "Unknown notification type: '{other}'. Valid types: {}",
                VALID_NOTIFICATION_TYPES.join(", ")
            ))),
        }
    }

    /// Whether notifications of this type survive until dismissed when the
    /// producer does not say otherwise.
    pub fn persistent_by_default(&self) -> bool {
        matches!(self, Self::Error | Self::System)
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// What an action button does, resolved by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    ViewOrder { order_id: DbId },
    ViewInventory { product_id: DbId },
    ViewInvoice { invoice_id: DbId },
    ViewMaintenance { maintenance_id: DbId },
    /// Escape hatch for UI-defined actions.
    Custom {
        name: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
}

/// A button attached to a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    #[serde(default)]
    pub primary: bool,
    pub action: ActionKind,
}

impl NotificationAction {
    /// A primary action with the given label.
    pub fn primary(label: impl Into<String>, action: ActionKind) -> Self {
        Self {
            label: label.into(),
            primary: true,
            action,
        }
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A user-facing alert held by the notification store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: Option<String>,
    pub message: String,
    pub timestamp: Timestamp,
    pub read: bool,
    pub persistent: bool,
    pub actions: Vec<NotificationAction>,
    /// Domain context (entity type, ids, severity). Opaque to the store.
    pub metadata: serde_json::Value,
}

impl Notification {
    /// Build a notification from producer options.
    ///
    /// `persistent` defaults per [`NotificationType::persistent_by_default`].
    pub fn new(
        id: NotificationId,
        notification_type: NotificationType,
        message: impl Into<String>,
        options: &NotifyOptions,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            notification_type,
            title: options.title.clone(),
            message: message.into(),
            timestamp,
            read: false,
            persistent: options
                .persistent
                .unwrap_or_else(|| notification_type.persistent_by_default()),
            actions: options.actions.clone(),
            metadata: options
                .metadata
                .clone()
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        }
    }
}

// ---------------------------------------------------------------------------
// NotifyOptions
// ---------------------------------------------------------------------------

/// Optional settings supplied when adding a notification.
///
/// Built with the `with_*` methods:
///
/// ```rust
/// use std::time::Duration;
/// use gestora_core::notification::NotifyOptions;
///
/// let options = NotifyOptions::default()
///     .with_title("Inventario")
///     .auto_remove_after(Duration::from_secs(10));
/// assert_eq!(options.title.as_deref(), Some("Inventario"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions {
    pub title: Option<String>,
    /// `None` means "use the type's default".
    pub persistent: Option<bool>,
    /// `None` means "use the store-wide delay".
    pub auto_remove_delay: Option<Duration>,
    pub actions: Vec<NotificationAction>,
    pub metadata: Option<serde_json::Value>,
}

impl NotifyOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    pub fn auto_remove_after(mut self, delay: Duration) -> Self {
        self.auto_remove_delay = Some(delay);
        self
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
