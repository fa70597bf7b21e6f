//! Notification engine configuration.

use serde::{Deserialize, Serialize};

/// Notification engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Buffer size for the transport event channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Maximum notifications retained in memory; oldest are trimmed beyond
    /// this.
    #[serde(default = "default_max_stored")]
    pub max_stored: usize,
    /// Whether to warm the sound asset cache when a subscription opens.
    #[serde(default = "default_true")]
    pub preload_sounds: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            max_stored: default_max_stored(),
            preload_sounds: default_true(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_max_stored() -> usize {
    200
}

fn default_true() -> bool {
    true
}
