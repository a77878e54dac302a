//! Folder access control: ownership plus `sharedWith` entries.

pub mod checker;

pub use checker::{AccessSource, AclChecker};
