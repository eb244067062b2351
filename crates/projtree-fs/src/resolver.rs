//! Logical-to-physical path resolution with root containment.

use std::path::{Path, PathBuf};

use projtree_core::{LogicalPath, ResourceNode, Resolved, TreeError};

/// Maps logical paths to locations under a single resource root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for `root`.
    ///
    /// The root is canonicalized once here and never changes afterwards.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, TreeError> {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root).map_err(|e| TreeError::io(root, e))?;

        if !root.is_dir() {
            return Err(TreeError::NotADirectory { path: root });
        }

        Ok(Self { root })
    }

    /// The canonical resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path without touching the filesystem.
    ///
    /// Fails with [`TreeError::InvalidPath`] if the path normalizes
    /// outside the root.
    pub fn resolve(&self, raw: &str) -> Result<ResourceNode, TreeError> {
        let logical = LogicalPath::parse(raw)?;
        let physical = logical.to_physical(&self.root);
        Ok(ResourceNode::new(logical, physical))
    }

    /// Resolve a logical path and classify what exists there.
    pub async fn inspect(&self, raw: &str) -> Result<Resolved, TreeError> {
        let node = self.resolve(raw)?;
        self.inspect_node(node).await
    }

    /// Classify an already resolved node.
    ///
    /// Existing targets are canonicalized so that a symlink pointing out
    /// of the root is rejected like a `..` escape.
    pub async fn inspect_node(&self, node: ResourceNode) -> Result<Resolved, TreeError> {
        let metadata = match tokio::fs::metadata(&node.physical).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Resolved::Missing(node));
            }
            Err(e) => return Err(TreeError::io(&node.physical, e)),
        };

        let canonical = tokio::fs::canonicalize(&node.physical)
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?;
        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                path = %node.logical,
                resolved_to = %canonical.display(),
                "rejecting path that leaves the resource root"
            );
            return Err(TreeError::invalid_path(node.logical.to_string()));
        }

        let file_type = metadata.file_type();
        Ok(if file_type.is_dir() {
            Resolved::Directory(node)
        } else if file_type.is_file() {
            Resolved::File(node)
        } else {
            Resolved::Other(node)
        })
    }
}
