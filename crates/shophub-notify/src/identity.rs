//! Identity source contract.

use tokio::sync::watch;

use shophub_core::types::id::UserId;

/// Supplies the current authenticated identity and its changes.
///
/// The receiver holds the current identity at subscribe time and is
/// updated on every sign-in and sign-out; `None` means signed out.
pub trait IdentitySource: Send + Sync {
    /// Subscribe to identity changes.
    fn watch(&self) -> watch::Receiver<Option<UserId>>;
}
