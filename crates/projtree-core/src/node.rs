//! Resolved resource nodes.

use std::path::PathBuf;

use crate::LogicalPath;

/// A file or directory located under the resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    /// Normalized logical path.
    pub logical: LogicalPath,
    /// Physical location on disk.
    pub physical: PathBuf,
}

impl ResourceNode {
    /// Create a new node.
    pub fn new(logical: LogicalPath, physical: impl Into<PathBuf>) -> Self {
        Self {
            logical,
            physical: physical.into(),
        }
    }

    /// Raw filesystem name (not full path). Empty for the root.
    pub fn name(&self) -> &str {
        self.logical.name().unwrap_or("")
    }

    /// Depth below the root: 0 for a project root, `None` for the root itself.
    pub fn depth(&self) -> Option<usize> {
        self.logical.depth()
    }

    /// Check if this node is the resource root.
    pub fn is_root(&self) -> bool {
        self.logical.is_root()
    }
}

/// Outcome of resolving a logical path against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// An existing directory.
    Directory(ResourceNode),
    /// An existing regular file.
    File(ResourceNode),
    /// Something that exists but is neither (socket, FIFO, device).
    Other(ResourceNode),
    /// Nothing exists at the location.
    Missing(ResourceNode),
}

impl Resolved {
    /// The node regardless of what was found.
    pub fn node(&self) -> &ResourceNode {
        match self {
            Resolved::Directory(node)
            | Resolved::File(node)
            | Resolved::Other(node)
            | Resolved::Missing(node) => node,
        }
    }

    /// Consume into the node regardless of what was found.
    pub fn into_node(self) -> ResourceNode {
        match self {
            Resolved::Directory(node)
            | Resolved::File(node)
            | Resolved::Other(node)
            | Resolved::Missing(node) => node,
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Resolved::Directory(_))
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, Resolved::File(_))
    }

    /// Check if anything exists at the location.
    pub fn exists(&self) -> bool {
        !matches!(self, Resolved::Missing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_depth_and_name() {
        let root = ResourceNode::new(LogicalPath::root(), "/srv");
        assert!(root.is_root());
        assert_eq!(root.name(), "");
        assert_eq!(root.depth(), None);

        let project = ResourceNode::new(LogicalPath::root().child("projA"), "/srv/projA");
        assert_eq!(project.depth(), Some(0));
        assert_eq!(project.name(), "projA");
        assert!(!project.is_root());
    }

    #[test]
    fn test_resolved_discrimination() {
        let node = ResourceNode::new(LogicalPath::root().child("a"), "/srv/a");

        let dir = Resolved::Directory(node.clone());
        assert!(dir.is_dir());
        assert!(dir.exists());

        let missing = Resolved::Missing(node.clone());
        assert!(!missing.exists());
        assert!(!missing.is_file());
        assert_eq!(missing.into_node(), node);
    }
}
