//! Project display names read from marker files.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use projtree_core::{ResourceNode, Resolved};

use crate::resolver::PathResolver;

/// Upper bound on how much of a marker file is read.
const MAX_MARKER_BYTES: u64 = 4096;

/// Resolves the human-readable name of a project root directory.
#[derive(Debug, Clone)]
pub struct DisplayNameResolver {
    resolver: PathResolver,
    marker_file: String,
}

impl DisplayNameResolver {
    /// Create a resolver that reads `marker_file` inside each project root.
    pub fn new(resolver: PathResolver, marker_file: impl Into<String>) -> Self {
        Self {
            resolver,
            marker_file: marker_file.into(),
        }
    }

    /// Name of the marker file.
    pub fn marker_file(&self) -> &str {
        &self.marker_file
    }

    /// Display name for `dir`.
    ///
    /// Returns the trimmed first line of the marker file, or the raw
    /// directory name if the marker is missing, empty, unreadable, not a
    /// plain file, or resolves outside the resource root.
    pub async fn resolve(&self, dir: &ResourceNode) -> String {
        let marker = ResourceNode::new(
            dir.logical.child(self.marker_file.as_str()),
            dir.physical.join(&self.marker_file),
        );

        // Only plain files are opened; opening a FIFO would block.
        let marker = match self.resolver.inspect_node(marker).await {
            Ok(Resolved::File(marker)) => marker,
            Ok(_) => return fallback_name(&dir.physical),
            Err(e) => {
                tracing::warn!(dir = %dir.logical, error = %e, "ignoring project marker");
                return fallback_name(&dir.physical);
            }
        };

        match read_first_line(&marker.physical).await {
            Ok(Some(name)) => name,
            Ok(None) => fallback_name(&dir.physical),
            Err(e) => {
                tracing::warn!(
                    marker = %marker.physical.display(),
                    error = %e,
                    "unreadable project marker, using folder name"
                );
                fallback_name(&dir.physical)
            }
        }
    }
}

async fn read_first_line(marker: &Path) -> std::io::Result<Option<String>> {
    let file = File::open(marker).await?;
    let mut reader = BufReader::new(file.take(MAX_MARKER_BYTES));

    let mut line = String::new();
    reader.read_line(&mut line).await?;

    let name = line.trim();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

fn fallback_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
