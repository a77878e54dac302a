//! Folder and document naming rules and path derivation.

use thiserror::Error;

/// Maximum name length, counted in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Characters that may not appear in a name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Why a name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Empty, or whitespace only.
    #[error("Name cannot be empty")]
    Empty,
    /// Longer than [`MAX_NAME_LENGTH`] characters.
    #[error("Name must be at most {MAX_NAME_LENGTH} characters")]
    TooLong,
    /// Contains a path delimiter or reserved character.
    #[error("Name cannot contain '{0}'")]
    ForbiddenChar(char),
    /// Contains a control character.
    #[error("Name cannot contain control characters")]
    ControlChar,
}

impl From<NameError> for stack_core::AppError {
    fn from(err: NameError) -> Self {
        stack_core::AppError::validation(err.to_string())
    }
}

/// Checks an already-trimmed name against the naming rules.
pub fn check_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong);
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(NameError::ForbiddenChar(c));
    }
    if name.chars().any(char::is_control) {
        return Err(NameError::ControlChar);
    }
    Ok(())
}

/// Trims surrounding whitespace and validates the result.
pub fn normalize_name(raw: &str) -> Result<String, NameError> {
    let trimmed = raw.trim();
    check_name(trimmed)?;
    Ok(trimmed.to_string())
}

/// Derives a folder path from its parent's path and its own name.
///
/// `"/" + name` at the root, `parent_path + "/" + name` otherwise.
pub fn child_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), name),
        None => format!("/{name}"),
    }
}

/// Replaces the last segment of `path` with `new_name`.
pub fn renamed_path(path: &str, new_name: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => format!("/{new_name}"),
        Some(idx) => format!("{}/{}", &path[..idx], new_name),
    }
}
