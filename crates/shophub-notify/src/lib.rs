//! # shophub-notify
//!
//! Per-session notification engine for ShopHub. Provides:
//!
//! - Subscription lifecycle bound to the authenticated identity
//! - Preference-driven filtering of inbound events
//! - The in-memory notification list with derived unread count
//! - Best-effort persistence, sound, and transient-alert side effects
//!
//! The UI layer talks only to [`NotificationEngine`]; the transport,
//! persistence store, audio subsystem, and alert surface plug in behind
//! the trait contracts in this crate.

pub mod engine;
pub mod filter;
pub mod identity;
pub mod list;
pub mod persistence;
pub mod preferences;
pub mod surface;
pub mod transport;

pub use engine::NotificationEngine;
pub use filter::FilterDecision;
pub use identity::IdentitySource;
pub use list::NotificationList;
pub use persistence::NotificationPersistence;
pub use preferences::PreferenceStore;
pub use surface::{AlertSurface, NotificationAudio, TransientAlert};
pub use transport::{ConnectionStatus, NotificationTransport, TransportEvent, TransportSubscription};
