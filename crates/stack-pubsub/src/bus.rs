//! Fire-and-forget publication of folder events.

use std::sync::Arc;

use tracing::{debug, info, warn};

use stack_core::config::{EventBackend, EventsConfig};
use stack_core::error::AppError;
use stack_core::events::{FOLDER_EVENTS_CHANNEL, FolderEvent};
use stack_core::result::AppResult;
use stack_core::traits::EventPublisher;

use crate::memory::MemoryPubSub;
use crate::redis_pubsub::RedisPubSub;

/// Builds the publisher selected by `events.backend`.
pub async fn build_publisher(config: &EventsConfig) -> AppResult<Arc<dyn EventPublisher>> {
    let publisher: Arc<dyn EventPublisher> = match config.backend {
        EventBackend::Memory => Arc::new(MemoryPubSub::new(config.channel_buffer_size)),
        EventBackend::Redis => Arc::new(RedisPubSub::connect(&config.redis_url).await?),
    };
    info!(backend = publisher.backend_name(), "Folder event publisher ready");
    Ok(publisher)
}

/// Publishes [`FolderEvent`]s on the `folder:events` channel.
///
/// Each event is serialized and handed to a spawned task; the caller never
/// waits for the backend and never sees its errors.
#[derive(Debug, Clone)]
pub struct FolderEventBus {
    /// The pub/sub backend.
    publisher: Arc<dyn EventPublisher>,
    /// Target channel name.
    channel: Arc<str>,
}

impl FolderEventBus {
    /// Creates a bus publishing on [`FOLDER_EVENTS_CHANNEL`].
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self::with_channel(publisher, FOLDER_EVENTS_CHANNEL)
    }

    /// Creates a bus publishing on a custom channel.
    pub fn with_channel(publisher: Arc<dyn EventPublisher>, channel: &str) -> Self {
        Self {
            publisher,
            channel: Arc::from(channel),
        }
    }

    /// The channel events are published on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Publishes an event without waiting for the backend.
    pub fn emit(&self, event: FolderEvent) {
        let payload = match serde_json::to_string(&event).map_err(AppError::from) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(event_type = event.event_type(), error = %e, "Failed to serialize folder event");
                return;
            }
        };

        let publisher = Arc::clone(&self.publisher);
        let channel = Arc::clone(&self.channel);
        let event_type = event.event_type();
        let folder_id = event.folder_id();

        tokio::spawn(async move {
            match publisher.publish(&channel, &payload).await {
                Ok(()) => debug!(
                    backend = publisher.backend_name(),
                    event_type,
                    folder_id = %folder_id,
                    "Folder event published"
                ),
                Err(e) => warn!(
                    backend = publisher.backend_name(),
                    event_type,
                    folder_id = %folder_id,
                    error = %e,
                    "Failed to publish folder event"
                ),
            }
        });
    }
}
