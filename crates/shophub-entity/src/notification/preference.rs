//! Notification preference entities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How often a category may produce an immediate alert.
///
/// Non-realtime frequencies still admit notifications into the list; they
/// only suppress the transient alert and sound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryFrequency {
    /// Surface immediately.
    #[default]
    Realtime,
    /// Batched into an hourly digest.
    Hourly,
    /// Batched into a daily digest.
    Daily,
}

impl DeliveryFrequency {
    /// Whether this frequency allows immediate surfacing.
    pub fn is_realtime(&self) -> bool {
        matches!(self, Self::Realtime)
    }

    /// Return the frequency as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

/// Sound played for immediately surfaced notifications.
///
/// [`None`](Self::None) is the no-sound sentinel: playback is skipped
/// entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSound {
    /// No sound.
    None,
    /// Default chime.
    #[default]
    Chime,
    /// Bell.
    Bell,
    /// Short ping.
    Ping,
    /// Urgent alert tone.
    Alert,
}

impl NotificationSound {
    /// Whether this selection produces audio at all.
    pub fn is_audible(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Return the sound token as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Chime => "chime",
            Self::Bell => "bell",
            Self::Ping => "ping",
            Self::Alert => "alert",
        }
    }
}

/// Per-user notification delivery preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Deliver via email digests.
    #[serde(default = "default_true")]
    pub email: bool,
    /// Deliver via push.
    #[serde(default = "default_true")]
    pub push: bool,
    /// Deliver in-app. Disabling drops inbound events entirely.
    #[serde(default = "default_true")]
    pub in_app: bool,
    /// Sound selection for immediate surfacing.
    #[serde(default)]
    pub sound: NotificationSound,
    /// Category → delivery frequency. Missing keys mean realtime.
    #[serde(default)]
    pub frequencies: HashMap<String, DeliveryFrequency>,
    /// Category → enabled. Missing keys mean enabled.
    #[serde(default)]
    pub subscriptions: HashMap<String, bool>,
}

impl NotificationPreferences {
    /// Effective delivery frequency for a category.
    pub fn frequency(&self, category: &str) -> DeliveryFrequency {
        self.frequencies.get(category).copied().unwrap_or_default()
    }

    /// Whether a category is subscribed. Categories without an explicit
    /// entry are enabled.
    pub fn is_subscribed(&self, category: &str) -> bool {
        self.subscriptions.get(category).copied().unwrap_or(true)
    }

    /// Apply a shallow partial update.
    ///
    /// Unspecified fields are untouched; the nested `frequencies` and
    /// `subscriptions` maps are replaced wholesale when supplied. Callers
    /// wanting a single-key patch use the dedicated store operations.
    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(push) = update.push {
            self.push = push;
        }
        if let Some(in_app) = update.in_app {
            self.in_app = in_app;
        }
        if let Some(sound) = update.sound {
            self.sound = sound;
        }
        if let Some(frequencies) = update.frequencies {
            self.frequencies = frequencies;
        }
        if let Some(subscriptions) = update.subscriptions {
            self.subscriptions = subscriptions;
        }
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            in_app: true,
            sound: NotificationSound::default(),
            frequencies: HashMap::new(),
            subscriptions: HashMap::new(),
        }
    }
}

/// Shallow partial update for [`NotificationPreferences`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    /// New email toggle.
    pub email: Option<bool>,
    /// New push toggle.
    pub push: Option<bool>,
    /// New in-app toggle.
    pub in_app: Option<bool>,
    /// New sound selection.
    pub sound: Option<NotificationSound>,
    /// Full replacement for the frequency map.
    pub frequencies: Option<HashMap<String, DeliveryFrequency>>,
    /// Full replacement for the subscription map.
    pub subscriptions: Option<HashMap<String, bool>>,
}

fn default_true() -> bool {
    true
}
