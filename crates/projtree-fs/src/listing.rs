//! One-level directory listings with project access filtering.

use projtree_core::{ListingEntry, ProjectAccessSet, ResourceNode, Resolved, TreeError};

use crate::display_name::DisplayNameResolver;
use crate::resolver::PathResolver;

/// Builds the listing of a single directory.
///
/// Children of the root are project roots: only directories are shown,
/// labeled with their display name, and only when the caller has access
/// to that project. Below the root every child is shown under its raw
/// name except the marker file.
#[derive(Debug, Clone)]
pub struct DirectoryListingBuilder {
    resolver: PathResolver,
    display_names: DisplayNameResolver,
}

impl DirectoryListingBuilder {
    /// Create a new listing builder.
    pub fn new(resolver: PathResolver, display_names: DisplayNameResolver) -> Self {
        Self {
            resolver,
            display_names,
        }
    }

    /// List the directory at a logical path.
    pub async fn build(
        &self,
        raw: &str,
        access: &ProjectAccessSet,
    ) -> Result<Vec<ListingEntry>, TreeError> {
        match self.resolver.inspect(raw).await? {
            Resolved::Directory(node) => self.build_node(&node, access).await,
            Resolved::Missing(node) => Err(TreeError::NotFound {
                path: node.physical,
            }),
            Resolved::File(node) | Resolved::Other(node) => Err(TreeError::NotADirectory {
                path: node.physical,
            }),
        }
    }

    /// List a directory that has already been resolved.
    pub async fn build_node(
        &self,
        dir: &ResourceNode,
        access: &ProjectAccessSet,
    ) -> Result<Vec<ListingEntry>, TreeError> {
        let mut entries = Vec::new();

        if let Some(parent) = dir.logical.parent() {
            entries.push(ListingEntry::parent(parent.dir_link()));
        }

        let mut children = tokio::fs::read_dir(&dir.physical)
            .await
            .map_err(|e| TreeError::io(&dir.physical, e))?;

        while let Some(child) = children
            .next_entry()
            .await
            .map_err(|e| TreeError::io(&dir.physical, e))?
        {
            let name = match child.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(name = ?raw, dir = %dir.logical, "skipping non UTF-8 entry");
                    continue;
                }
            };

            // Same containment rules as a direct request: symlinks are
            // followed, but never out of the root.
            let node = ResourceNode::new(dir.logical.child(name.as_str()), child.path());
            let resolved = match self.resolver.inspect_node(node).await {
                Ok(Resolved::Missing(node)) => {
                    tracing::warn!(path = %node.logical, "skipping dangling entry");
                    continue;
                }
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!(
                        dir = %dir.logical,
                        name = %name,
                        error = %e,
                        "skipping entry"
                    );
                    continue;
                }
            };
            let is_dir = resolved.is_dir();
            let node = resolved.into_node();
            let logical = &node.logical;

            if dir.is_root() {
                if !is_dir {
                    continue;
                }
                let display_name = self.display_names.resolve(&node).await;
                if access.contains(&display_name) {
                    entries.push(ListingEntry::directory(logical.dir_link(), display_name));
                }
            } else if is_dir {
                entries.push(ListingEntry::directory(logical.dir_link(), name));
            } else if name != self.display_names.marker_file() {
                entries.push(ListingEntry::file(logical.file_link(), name));
            }
        }

        tracing::debug!(dir = %dir.logical, entries = entries.len(), "built listing");
        Ok(entries)
    }
}
