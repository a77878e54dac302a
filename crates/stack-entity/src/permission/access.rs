//! Effective access levels on a folder.

use serde::{Deserialize, Serialize};

use super::share::SharePermission;

/// The access a caller effectively holds on a folder.
///
/// Ordered by privilege: Owner > Admin > Write > Read. The creator holds
/// `Owner`; everyone else holds whatever their share entry grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderAccess {
    /// Read-only.
    Read,
    /// Can add subfolders and documents.
    Write,
    /// Can update, delete, share and unshare.
    Admin,
    /// The creator: implicit full control.
    Owner,
}

impl FolderAccess {
    /// Check if this access grants at least the given level.
    pub fn has_at_least(&self, required: FolderAccess) -> bool {
        *self >= required
    }

    /// Whether subfolders and documents may be created inside.
    pub fn can_write(&self) -> bool {
        self.has_at_least(Self::Write)
    }

    /// Whether the folder itself may be updated, deleted, or re-shared.
    pub fn can_manage(&self) -> bool {
        self.has_at_least(Self::Admin)
    }

    /// Return the access level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl From<SharePermission> for FolderAccess {
    fn from(permission: SharePermission) -> Self {
        match permission {
            SharePermission::Read => Self::Read,
            SharePermission::Write => Self::Write,
            SharePermission::Admin => Self::Admin,
        }
    }
}
