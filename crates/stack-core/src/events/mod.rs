//! Domain events emitted by folder operations.
//!
//! Events are published to a pub/sub channel and consumed by services
//! outside this repository (search indexing, audit log).

pub mod folder;

pub use folder::FolderEvent;

/// Pub/sub channel that carries every [`FolderEvent`].
pub const FOLDER_EVENTS_CHANNEL: &str = "folder:events";
