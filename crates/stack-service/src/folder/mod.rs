//! Folder management and sharing.

pub mod service;

pub use service::{CreateFolderRequest, FolderService, ShareFolderRequest, UpdateFolderRequest};
