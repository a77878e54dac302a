//! Publisher trait for pluggable pub/sub backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for pub/sub backends (in-process broadcast or Redis).
///
/// Payloads are already-serialized JSON strings. Publishing to a channel
/// nobody listens on is not an error.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a payload on a channel.
    async fn publish(&self, channel: &str, payload: &str) -> AppResult<()>;

    /// Short backend name used in logs (`"memory"`, `"redis"`).
    fn backend_name(&self) -> &'static str;
}
