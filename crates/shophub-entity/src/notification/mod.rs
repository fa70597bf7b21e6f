//! Notification domain entities.

pub mod category;
pub mod kind;
pub mod model;
pub mod preference;
pub mod priority;

pub use category::NotificationCategory;
pub use kind::NotificationKind;
pub use model::{Notification, NotificationDraft};
pub use preference::{
    DeliveryFrequency, NotificationPreferences, NotificationSound, PreferenceUpdate,
};
pub use priority::NotificationPriority;
