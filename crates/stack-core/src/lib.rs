//! # stack-core
//!
//! Core crate for the Stack document service. Contains configuration
//! schemas, folder domain events, the event publisher trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Stack crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
