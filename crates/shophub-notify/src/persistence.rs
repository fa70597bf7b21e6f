//! Persistence contract — best-effort remote mirror of the local list.

use async_trait::async_trait;

use shophub_core::result::AppResult;
use shophub_core::types::id::NotificationId;
use shophub_entity::notification::Notification;

/// Remote persistence for notification state.
///
/// The engine treats every call as best-effort: failures are logged and
/// the local list is never rolled back.
#[async_trait]
pub trait NotificationPersistence: Send + Sync {
    /// Persists a newly created notification.
    async fn add(&self, notification: &Notification) -> AppResult<()>;

    /// Marks one notification read.
    async fn mark_read(&self, id: NotificationId) -> AppResult<()>;

    /// Marks every notification read.
    async fn mark_all_read(&self) -> AppResult<()>;

    /// Removes one notification.
    async fn clear(&self, id: NotificationId) -> AppResult<()>;

    /// Removes every notification.
    async fn clear_all(&self) -> AppResult<()>;
}
