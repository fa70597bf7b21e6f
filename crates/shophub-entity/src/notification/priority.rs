//! Notification priority levels.

use serde::{Deserialize, Serialize};

/// Notification priority levels.
///
/// A record without a priority is treated as [`High`](Self::High) when
/// deciding whether to surface it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Low priority — background events.
    Low,
    /// Medium priority — standard events.
    Medium,
    /// High priority — surfaced immediately under realtime delivery.
    High,
}

impl NotificationPriority {
    /// Parse from string, defaulting unknown values to medium.
    pub fn from_str_value(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
