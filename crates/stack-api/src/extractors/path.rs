//! Typed path and query parameter helpers.

use uuid::Uuid;

use stack_core::error::AppError;

/// Parses a UUID from a path segment or query value.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid UUID: {s}")))
}

/// Parses an optional query value, treating an empty string as absent.
pub fn parse_optional_uuid(s: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_uuid(s).map(Some),
    }
}
