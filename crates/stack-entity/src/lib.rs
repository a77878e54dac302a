//! # stack-entity
//!
//! Domain entity models for the Stack document service. Every struct in
//! this crate represents a stored record or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`; flat
//! database rows additionally derive `sqlx::FromRow`.
//!
//! JSON field names are camelCase to match the HTTP API.

pub mod document;
pub mod folder;
pub mod permission;
