//! Redis pub/sub backend for multi-node deployments.

#[cfg(feature = "redis-pubsub")]
pub mod implementation {
    use async_trait::async_trait;
    use redis::aio::ConnectionManager;
    use tracing::info;

    use stack_core::error::{AppError, ErrorKind};
    use stack_core::result::AppResult;
    use stack_core::traits::EventPublisher;

    /// Publishes payloads with Redis `PUBLISH` over a managed connection.
    #[derive(Clone)]
    pub struct RedisPubSub {
        /// Auto-reconnecting multiplexed connection.
        conn: ConnectionManager,
        /// Redis URL, kept for diagnostics.
        url: String,
    }

    impl std::fmt::Debug for RedisPubSub {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RedisPubSub").field("url", &self.url).finish()
        }
    }

    impl RedisPubSub {
        /// Connects to Redis.
        pub async fn connect(url: &str) -> AppResult<Self> {
            let client = redis::Client::open(url).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
            })?;

            let conn = ConnectionManager::new(client).await.map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Redis connection failed", e)
            })?;

            info!(url, "Connected to Redis for folder events");
            Ok(Self {
                conn,
                url: url.to_string(),
            })
        }
    }

    #[async_trait]
    impl EventPublisher for RedisPubSub {
        async fn publish(&self, channel: &str, payload: &str) -> AppResult<()> {
            let mut conn = self.conn.clone();
            redis::cmd("PUBLISH")
                .arg(channel)
                .arg(payload)
                .query_async::<i64>(&mut conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::ExternalService, "Redis PUBLISH failed", e)
                })?;
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "redis"
        }
    }
}

#[cfg(not(feature = "redis-pubsub"))]
pub mod implementation {
    use async_trait::async_trait;

    use stack_core::error::AppError;
    use stack_core::result::AppResult;
    use stack_core::traits::EventPublisher;

    const FEATURE_REQUIRED: &str = "events.backend = \"redis\" requires the redis-pubsub feature";

    /// Placeholder when the `redis-pubsub` feature is disabled.
    #[derive(Debug, Clone)]
    pub struct RedisPubSub;

    impl RedisPubSub {
        /// Always fails: the binary was built without Redis support.
        pub async fn connect(_url: &str) -> AppResult<Self> {
            Err(AppError::configuration(FEATURE_REQUIRED))
        }
    }

    #[async_trait]
    impl EventPublisher for RedisPubSub {
        async fn publish(&self, _channel: &str, _payload: &str) -> AppResult<()> {
            Err(AppError::configuration(FEATURE_REQUIRED))
        }

        fn backend_name(&self) -> &'static str {
            "redis"
        }
    }
}

pub use implementation::RedisPubSub;
