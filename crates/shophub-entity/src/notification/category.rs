//! Notification category enumeration.

use serde::{Deserialize, Serialize};

/// Well-known notification categories for filtering and preference
/// matching.
///
/// Notification records and preference maps carry the category as an open
/// string so unknown categories flow through with default-enabled
/// semantics; this enum covers the values the product itself emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// System-level notifications.
    System,
    /// Invoice and billing notifications.
    Invoice,
    /// Work-order notifications (created, assigned, completed).
    WorkOrder,
    /// Inventory notifications (low stock, restock).
    Inventory,
    /// Customer notifications.
    Customer,
    /// Team and staffing notifications.
    Team,
    /// Chat messages.
    Chat,
}

impl NotificationCategory {
    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Invoice => "invoice",
            Self::WorkOrder => "work_order",
            Self::Inventory => "inventory",
            Self::Customer => "customer",
            Self::Team => "team",
            Self::Chat => "chat",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
