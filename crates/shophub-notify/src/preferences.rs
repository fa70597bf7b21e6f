//! Live preference store with shallow-merge and nested-patch updates.

use std::sync::RwLock;

use tracing::debug;

use shophub_entity::notification::{
    DeliveryFrequency, NotificationPreferences, PreferenceUpdate,
};

/// Holds the current notification preferences for the active session.
///
/// Reads always observe the latest write. The filtering pipeline snapshots
/// this store at decision time rather than capturing a value when the
/// subscription opens, so an update that completes before an inbound event
/// is processed always governs that event.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    current: RwLock<NotificationPreferences>,
}

impl PreferenceStore {
    /// Creates a store with default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given preferences.
    pub fn with_preferences(preferences: NotificationPreferences) -> Self {
        Self {
            current: RwLock::new(preferences),
        }
    }

    /// Current preferences value.
    pub fn snapshot(&self) -> NotificationPreferences {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Applies a shallow partial update. Supplied nested maps replace the
    /// existing ones wholesale; see [`PreferenceStore::set_subscription`]
    /// and [`PreferenceStore::set_frequency`] for single-key patches.
    pub fn update(&self, update: PreferenceUpdate) {
        self.write().apply(update);
        debug!("Notification preferences updated");
    }

    /// Patches exactly one subscription entry, leaving all others
    /// untouched. A category without an existing entry gets a new one;
    /// unknown categories are not an error.
    pub fn set_subscription(&self, category: &str, enabled: bool) {
        self.write()
            .subscriptions
            .insert(category.to_string(), enabled);
        debug!(category, enabled, "Subscription updated");
    }

    /// Patches exactly one frequency entry, leaving all others untouched.
    pub fn set_frequency(&self, category: &str, frequency: DeliveryFrequency) {
        self.write()
            .frequencies
            .insert(category.to_string(), frequency);
        debug!(category, frequency = frequency.as_str(), "Frequency updated");
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, NotificationPreferences> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shophub_entity::notification::NotificationSound;

    #[test]
    fn test_update_is_shallow() {
        let store = PreferenceStore::new();
        store.set_subscription("chat", false);

        store.update(PreferenceUpdate {
            push: Some(false),
            ..Default::default()
        });

        let prefs = store.snapshot();
        assert!(!prefs.push);
        assert!(prefs.email);
        // The subscription map was not supplied, so it is untouched.
        assert!(!prefs.is_subscribed("chat"));
    }

    #[test]
    fn test_set_subscription_patches_one_key() {
        let store = PreferenceStore::new();
        store.set_subscription("team", false);
        store.set_frequency("inventory", DeliveryFrequency::Daily);
        store.set_subscription("chat", false);

        let prefs = store.snapshot();
        assert!(!prefs.is_subscribed("team"));
        assert!(!prefs.is_subscribed("chat"));
        assert!(prefs.is_subscribed("invoice"));
        assert_eq!(prefs.frequency("inventory"), DeliveryFrequency::Daily);
        assert_eq!(prefs.sound, NotificationSound::Chime);
    }

    #[test]
    fn test_unknown_category_inserts_new_key() {
        let store = PreferenceStore::new();
        store.set_subscription("vendor_portal", false);
        assert!(!store.snapshot().is_subscribed("vendor_portal"));
    }

    #[test]
    fn test_reads_observe_latest_write() {
        let store = PreferenceStore::new();
        assert!(store.snapshot().is_subscribed("chat"));
        store.set_subscription("chat", false);
        assert!(!store.snapshot().is_subscribed("chat"));
    }
}
