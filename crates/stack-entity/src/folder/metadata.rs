//! Folder presentation metadata.

use serde::{Deserialize, Serialize};

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
/// Maximum icon identifier length in characters.
pub const MAX_ICON_LENGTH: usize = 64;
/// Maximum number of tags on a folder.
pub const MAX_TAGS: usize = 20;
/// Maximum length of a single tag in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// Display metadata attached to a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadata {
    /// Free-form description.
    pub description: Option<String>,
    /// Hex color (`#RGB` or `#RRGGBB`).
    pub color: Option<String>,
    /// Icon identifier understood by the frontend.
    pub icon: Option<String>,
    /// Tags, in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial metadata update: every `Some` field replaces the stored value.
///
/// An empty `description`, `color` or `icon` clears that field, and an
/// empty tag list removes all tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadataPatch {
    /// New description.
    pub description: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New icon.
    pub icon: Option<String>,
    /// New tag list.
    pub tags: Option<Vec<String>>,
}

impl FolderMetadataPatch {
    /// Applies the patch, returning whether anything changed.
    pub fn apply_to(self, metadata: &mut FolderMetadata) -> bool {
        let before = metadata.clone();
        if let Some(description) = self.description {
            metadata.description = non_empty(description);
        }
        if let Some(color) = self.color {
            metadata.color = non_empty(color);
        }
        if let Some(icon) = self.icon {
            metadata.icon = non_empty(icon);
        }
        if let Some(tags) = self.tags {
            metadata.tags = tags;
        }
        *metadata != before
    }
}

impl From<FolderMetadataPatch> for FolderMetadata {
    fn from(patch: FolderMetadataPatch) -> Self {
        let mut metadata = FolderMetadata::default();
        patch.apply_to(&mut metadata);
        metadata
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Whether `color` is a `#RGB` or `#RRGGBB` hex string.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
