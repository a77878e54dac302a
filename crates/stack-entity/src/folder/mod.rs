//! Folder domain entities.

pub mod metadata;
pub mod model;
pub mod name;

pub use metadata::{FolderMetadata, FolderMetadataPatch};
pub use model::{CreateFolder, Folder, FolderWithCounts};
pub use name::{NameError, child_path, normalize_name};
