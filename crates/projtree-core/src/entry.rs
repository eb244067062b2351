//! Directory listing entries.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Label used for the link back to the containing directory.
pub const PARENT_LABEL: &str = "parent";

/// Kind of row in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// Link to the containing directory.
    Parent,
    /// A directory to navigate into.
    Directory,
    /// A file to fetch.
    File,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// What the row points at.
    pub kind: EntryKind,
    /// Logical path used to navigate to or fetch the target.
    pub path: String,
    /// Text shown to the caller.
    pub label: CompactString,
}

impl ListingEntry {
    /// Create the parent-folder link.
    pub fn parent(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Parent,
            path: path.into(),
            label: PARENT_LABEL.into(),
        }
    }

    /// Create a directory row.
    pub fn directory(path: impl Into<String>, label: impl Into<CompactString>) -> Self {
        Self {
            kind: EntryKind::Directory,
            path: path.into(),
            label: label.into(),
        }
    }

    /// Create a file row.
    pub fn file(path: impl Into<String>, label: impl Into<CompactString>) -> Self {
        Self {
            kind: EntryKind::File,
            path: path.into(),
            label: label.into(),
        }
    }

    /// Check if this is the parent link.
    pub fn is_parent(&self) -> bool {
        self.kind == EntryKind::Parent
    }
}
