//! # stack-database
//!
//! SQLite connection management, embedded migrations, and concrete
//! repository implementations for folders, folder shares, and documents.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{DocumentRepository, FolderRepository};
