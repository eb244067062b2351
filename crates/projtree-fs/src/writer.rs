//! Whole-file content replacement.

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use projtree_core::{ResourceNode, Resolved, TreeError};

use crate::resolver::PathResolver;

/// Result of a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The file existed and its content was replaced.
    Replaced {
        /// Number of bytes now in the file.
        bytes_written: u64,
    },
    /// Nothing was written because no plain file exists at the path.
    Noop,
}

/// Replaces the content of existing files.
///
/// The file is truncated and then written. A crash between the two
/// leaves partial content behind; no temporary-file swap is attempted.
#[derive(Debug, Clone)]
pub struct ContentWriter {
    resolver: PathResolver,
}

impl ContentWriter {
    /// Create a new writer.
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Replace the content of the file at a logical path.
    ///
    /// Missing targets and anything that is not a plain file are left
    /// untouched and reported as [`WriteOutcome::Noop`].
    pub async fn write(&self, raw: &str, content: &[u8]) -> Result<WriteOutcome, TreeError> {
        match self.resolver.inspect(raw).await? {
            Resolved::File(node) => self.replace(&node, content).await,
            resolved => {
                tracing::debug!(path = %resolved.node().logical, "write skipped, no plain file");
                Ok(WriteOutcome::Noop)
            }
        }
    }

    /// Replace the content of an already resolved file.
    pub async fn replace(
        &self,
        node: &ResourceNode,
        content: &[u8],
    ) -> Result<WriteOutcome, TreeError> {
        // Never create: a file removed since resolution stays removed.
        let mut file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&node.physical)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(WriteOutcome::Noop),
            Err(e) => return Err(TreeError::io(&node.physical, e)),
        };

        file.write_all(content)
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?;
        file.flush()
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?;

        tracing::debug!(path = %node.logical, bytes = content.len(), "replaced file content");
        Ok(WriteOutcome::Replaced {
            bytes_written: content.len() as u64,
        })
    }
}
