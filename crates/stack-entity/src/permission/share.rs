//! Sharing entries and the per-folder share map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permission granted to a non-owner through a share entry.
///
/// Ordered by privilege: Admin > Write > Read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    /// View the folder and its contents.
    Read,
    /// Additionally create subfolders and documents.
    Write,
    /// Additionally update, delete, share and unshare.
    Admin,
}

impl SharePermission {
    /// Return the permission as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SharePermission {
    type Err = stack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "admin" => Ok(Self::Admin),
            _ => Err(stack_core::AppError::validation(format!(
                "Invalid permission '{s}': expected read, write or admin"
            ))),
        }
    }
}

/// A `(userId, permission)` pair granting access to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareEntry {
    /// The user granted access.
    pub user_id: Uuid,
    /// The granted permission.
    pub permission: SharePermission,
    /// When the entry was created or last changed.
    pub shared_at: DateTime<Utc>,
}

/// The share entries of one folder, keyed by user.
///
/// Serialized as an array of [`ShareEntry`] ordered by user ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ShareEntry>", into = "Vec<ShareEntry>")]
pub struct SharedWith {
    entries: BTreeMap<Uuid, ShareEntry>,
}

impl SharedWith {
    /// Creates an empty share map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry for a user.
    pub fn get(&self, user_id: &Uuid) -> Option<&ShareEntry> {
        self.entries.get(user_id)
    }

    /// Inserts or replaces the entry for `entry.user_id`.
    ///
    /// Returns the previous entry, if there was one.
    pub fn upsert(&mut self, entry: ShareEntry) -> Option<ShareEntry> {
        self.entries.insert(entry.user_id, entry)
    }

    /// Removes the entry for a user.
    pub fn remove(&mut self, user_id: &Uuid) -> Option<ShareEntry> {
        self.entries.remove(user_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the folder is shared with nobody.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in user-ID order.
    pub fn iter(&self) -> impl Iterator<Item = &ShareEntry> {
        self.entries.values()
    }
}

impl From<Vec<ShareEntry>> for SharedWith {
    fn from(entries: Vec<ShareEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<SharedWith> for Vec<ShareEntry> {
    fn from(shared: SharedWith) -> Self {
        shared.entries.into_values().collect()
    }
}

impl FromIterator<ShareEntry> for SharedWith {
    fn from_iter<I: IntoIterator<Item = ShareEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|e| (e.user_id, e)).collect(),
        }
    }
}
