//! # stack-pubsub
//!
//! Publication of folder lifecycle events for downstream consumers
//! (search indexing, audit logging). Provides:
//!
//! - An in-process broadcast backend for single-node deployments and tests
//! - A Redis `PUBLISH` backend for multi-node deployments (`redis-pubsub`)
//! - [`FolderEventBus`], the fire-and-forget publisher used by the services

pub mod bus;
pub mod memory;
pub mod redis_pubsub;

pub use bus::{FolderEventBus, build_publisher};
pub use memory::MemoryPubSub;
pub use redis_pubsub::RedisPubSub;
