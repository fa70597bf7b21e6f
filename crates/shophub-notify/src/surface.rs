//! Audio and transient-alert collaborator contracts.

use async_trait::async_trait;

use shophub_core::result::AppResult;
use shophub_entity::notification::{Notification, NotificationKind, NotificationSound};

/// A transient visual alert (toast equivalent) derived from a
/// notification.
#[derive(Debug, Clone)]
pub struct TransientAlert {
    /// Alert title.
    pub title: String,
    /// Alert body text.
    pub message: String,
    /// Visual treatment.
    pub kind: NotificationKind,
}

impl TransientAlert {
    /// Builds an alert from a notification record.
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
        }
    }
}

/// Sound playback for immediately surfaced notifications.
#[async_trait]
pub trait NotificationAudio: Send + Sync {
    /// Warms the sound asset cache. Best-effort; implementations swallow
    /// their own failures.
    async fn preload(&self);

    /// Plays the given sound.
    async fn play(&self, sound: NotificationSound) -> AppResult<()>;
}

/// Transient alert surface. Fire-and-forget.
pub trait AlertSurface: Send + Sync {
    /// Shows an alert.
    fn show(&self, alert: TransientAlert);
}
