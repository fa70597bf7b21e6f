//! Transport contract — the realtime channel delivering inbound events.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use shophub_core::result::AppResult;
use shophub_core::types::id::UserId;
use shophub_entity::notification::NotificationDraft;

/// Connection status of the engine's live subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No subscription is open.
    #[default]
    Disconnected,
    /// A subscription is being opened.
    Connecting,
    /// A subscription is live.
    Connected,
}

impl ConnectionStatus {
    /// Whether the subscription is live.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events delivered by an open transport subscription.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Transport-level status change.
    Status(ConnectionStatus),
    /// Inbound notification payload.
    Notification(NotificationDraft),
}

/// A live subscription scoped to one identity.
///
/// Dropping the receiver is the unsubscribe: the transport must stop
/// delivering once the engine tears the subscription down.
#[derive(Debug)]
pub struct TransportSubscription {
    /// Stream of inbound events for the bound identity.
    pub events: mpsc::Receiver<TransportEvent>,
}

/// Realtime channel contract.
///
/// Implementations own the wire protocol (socket, poll loop) and any
/// retry/backoff policy; the engine only sees the event stream.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Opens a subscription scoped to `identity`.
    async fn connect(&self, identity: UserId) -> AppResult<TransportSubscription>;

    /// Tears down the current subscription. Must be safe to call when
    /// nothing is connected.
    async fn disconnect(&self) -> AppResult<()>;

    /// Asks the transport to emit a synthetic inbound event for manual
    /// verification.
    async fn trigger_demo_notification(&self) -> AppResult<()>;
}
