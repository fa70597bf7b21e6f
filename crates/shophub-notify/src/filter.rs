//! Preference-driven filtering of inbound notifications.
//!
//! Pure decision logic: given an inbound draft and a preferences snapshot,
//! decide whether to admit it into the list and whether to surface it
//! immediately. No clock, no I/O.

use shophub_entity::notification::{
    NotificationDraft, NotificationPreferences, NotificationPriority,
};

/// Outcome of filtering a single inbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDecision {
    /// Admit into the notification list at all.
    pub admit: bool,
    /// Show a transient alert.
    pub show_alert: bool,
    /// Play the configured sound.
    pub play_sound: bool,
}

impl FilterDecision {
    /// Drop the notification entirely.
    pub const DROP: Self = Self {
        admit: false,
        show_alert: false,
        play_sound: false,
    };

    /// Admit without immediate surfacing.
    pub const SILENT: Self = Self {
        admit: true,
        show_alert: false,
        play_sound: false,
    };
}

/// Decide how to handle an inbound notification under the given
/// preferences.
///
/// Callers must pass a snapshot read at decision time, never one captured
/// when the subscription was opened: a preference update that completed
/// before the event is processed must govern this decision.
pub fn decide(draft: &NotificationDraft, prefs: &NotificationPreferences) -> FilterDecision {
    // In-app delivery off, or the category explicitly unsubscribed: drop.
    // Categories without an explicit subscription entry are admitted.
    if !prefs.in_app || !prefs.is_subscribed(&draft.category) {
        return FilterDecision::DROP;
    }

    // Non-realtime categories queue silently; the notification is visible
    // when the user opens the list but produces no alert or sound.
    if !prefs.frequency(&draft.category).is_realtime() {
        return FilterDecision::SILENT;
    }

    // Absent priority counts as high. Medium and low admit silently even
    // under realtime delivery.
    let immediate = matches!(draft.priority, None | Some(NotificationPriority::High));

    FilterDecision {
        admit: true,
        show_alert: immediate,
        play_sound: immediate && prefs.sound.is_audible(),
    }
}
