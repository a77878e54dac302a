//! Sharing (ACL) domain entities.

pub mod access;
pub mod share;

pub use access::FolderAccess;
pub use share::{ShareEntry, SharePermission, SharedWith};
