//! Repository implementations for the document service entities.

pub mod document;
pub mod folder;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
