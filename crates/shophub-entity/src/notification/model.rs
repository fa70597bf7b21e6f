//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shophub_core::types::id::NotificationId;

use super::category::NotificationCategory;
use super::kind::NotificationKind;
use super::priority::NotificationPriority;

/// A notification surfaced to the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Visual treatment for downstream alert surfaces.
    pub kind: NotificationKind,
    /// Category key used for preference lookups.
    pub category: String,
    /// Priority level. Absent counts as high when surfacing.
    pub priority: Option<NotificationPriority>,
    /// When the notification was created.
    pub timestamp: DateTime<Utc>,
    /// Whether the user has read this notification. Set true only.
    pub read: bool,
}

impl Notification {
    /// Materialize a draft into a full record: assigns the id and
    /// timestamp, starts unread.
    pub fn from_draft(draft: NotificationDraft) -> Self {
        Self {
            id: NotificationId::new(),
            title: draft.title,
            message: draft.message,
            kind: draft.kind,
            category: draft.category,
            priority: draft.priority,
            timestamp: Utc::now(),
            read: false,
        }
    }

    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Payload of an inbound event or a locally added notification.
///
/// Missing fields take the generic defaults: kind `info`, category
/// `system`, no priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDraft {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Visual treatment.
    #[serde(default)]
    pub kind: NotificationKind,
    /// Category key.
    #[serde(default = "default_category")]
    pub category: String,
    /// Priority level.
    pub priority: Option<NotificationPriority>,
}

impl NotificationDraft {
    /// Create a draft with default kind, category, and priority.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: NotificationKind::default(),
            category: default_category(),
            priority: None,
        }
    }

    /// Set the kind.
    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

fn default_category() -> String {
    NotificationCategory::System.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_starts_unread() {
        let draft = NotificationDraft::new("Invoice paid", "Invoice #1042 was paid")
            .category(NotificationCategory::Invoice.as_str())
            .priority(NotificationPriority::High);
        let notification = Notification::from_draft(draft);

        assert!(notification.is_unread());
        assert_eq!(notification.category, "invoice");
        assert_eq!(notification.priority, Some(NotificationPriority::High));
    }

    #[test]
    fn test_draft_defaults() {
        let draft = NotificationDraft::new("t", "m");
        assert_eq!(draft.category, "system");
        assert_eq!(draft.kind, NotificationKind::Info);
        assert!(draft.priority.is_none());
    }

    #[test]
    fn test_draft_deserializes_with_missing_fields() {
        let draft: NotificationDraft =
            serde_json::from_str(r#"{"title": "t", "message": "m"}"#).unwrap();
        assert_eq!(draft.category, "system");
        assert!(draft.priority.is_none());
    }
}
