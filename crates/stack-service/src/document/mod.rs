//! Document management.

pub mod service;

pub use service::{CreateDocumentRequest, DocumentService};
