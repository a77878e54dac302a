//! In-memory pub/sub for single-node deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tracing::trace;

use stack_core::result::AppResult;
use stack_core::traits::EventPublisher;

/// In-memory pub/sub implementation.
///
/// A channel exists once somebody subscribes to it; publishing to a
/// channel without subscribers drops the payload.
#[derive(Debug)]
pub struct MemoryPubSub {
    /// Channel name → broadcast sender
    channels: RwLock<HashMap<String, broadcast::Sender<String>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryPubSub {
    /// Create a new in-memory pub/sub
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Subscribe to a channel, returns a receiver
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<String> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        tx.subscribe()
    }

    /// Number of live receivers on a channel.
    pub async fn subscriber_count(&self, channel: &str) -> usize {
        let channels = self.channels.read().await;
        channels.get(channel).map_or(0, |tx| tx.receiver_count())
    }
}

#[async_trait]
impl EventPublisher for MemoryPubSub {
    async fn publish(&self, channel: &str, payload: &str) -> AppResult<()> {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(channel) {
            let delivered = tx.send(payload.to_string()).unwrap_or(0);
            trace!(channel, delivered, "Published to in-memory channel");
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
