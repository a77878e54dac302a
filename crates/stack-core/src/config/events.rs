//! Folder event publication configuration.

use serde::{Deserialize, Serialize};

/// Which pub/sub backend receives folder events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventBackend {
    /// In-process broadcast channels (single node).
    #[default]
    Memory,
    /// Redis `PUBLISH` (requires the `redis-pubsub` feature).
    Redis,
}

/// Event bus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: EventBackend,
    /// Buffer size of in-process broadcast channels.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Redis connection URL (used when `backend = "redis"`).
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            backend: EventBackend::default(),
            channel_buffer_size: default_channel_buffer(),
            redis_url: default_redis_url(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
