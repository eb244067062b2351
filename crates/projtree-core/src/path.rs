//! Logical resource paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use compact_str::CompactString;

use crate::TreeError;

/// A normalized path relative to the resource root.
///
/// Logical paths are always UTF-8 and always use forward solidi as
/// separators, regardless of platform. Parsing removes empty and `.`
/// components and folds `..` into the preceding component. A `..` with
/// nothing left to fold into would leave the root and is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LogicalPath {
    segments: Vec<CompactString>,
}

impl LogicalPath {
    /// The path of the resource root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse and normalize a caller-supplied path.
    pub fn parse(raw: &str) -> Result<Self, TreeError> {
        let mut segments: Vec<CompactString> = Vec::new();

        for component in raw.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(TreeError::invalid_path(raw));
                    }
                }
                name => {
                    validate_component(name).map_err(|_| TreeError::invalid_path(raw))?;
                    segments.push(name.into());
                }
            }
        }

        Ok(Self { segments })
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path components from the root down.
    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    /// Last component, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Depth below the root: 0 for a project root, `None` for the root itself.
    pub fn depth(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    /// The containing path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    /// Append a single child name read from the filesystem.
    pub fn child(&self, name: impl Into<CompactString>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Physical location of this path under `root`.
    pub fn to_physical(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in &self.segments {
            path.push(segment.as_str());
        }
        path
    }

    /// Navigation link for a directory at this path (`/` or `/a/b/`).
    pub fn dir_link(&self) -> String {
        let mut link = String::from("/");
        for segment in &self.segments {
            link.push_str(segment);
            link.push('/');
        }
        link
    }

    /// Navigation link for a file at this path (`/a/b`).
    pub fn file_link(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for LogicalPath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reject components that could be reinterpreted by the host filesystem.
fn validate_component(name: &str) -> Result<(), String> {
    if name.contains('\0') {
        return Err("Name cannot contain NUL".into());
    }

    #[cfg(target_os = "windows")]
    {
        for c in ['\\', ':'] {
            if name.contains(c) {
                return Err(format!("Name cannot contain '{}'", c));
            }
        }
    }

    Ok(())
}
