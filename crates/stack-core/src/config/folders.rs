//! Folder behaviour configuration.

use serde::{Deserialize, Serialize};

/// Folder service switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Rewrite descendant paths when a folder is renamed.
    ///
    /// Off by default: only the renamed folder's own path is recomputed.
    #[serde(default)]
    pub cascade_path_updates: bool,
}
