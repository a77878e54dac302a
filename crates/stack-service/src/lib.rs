//! # stack-service
//!
//! Business logic service layer for the Stack document service. Each
//! service orchestrates repositories, access checks, and event publication
//! to implement one resource's use cases.
//!
//! Services use constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod document;
pub mod folder;

pub use context::RequestContext;
pub use document::{CreateDocumentRequest, DocumentService};
pub use folder::{CreateFolderRequest, FolderService, ShareFolderRequest, UpdateFolderRequest};
