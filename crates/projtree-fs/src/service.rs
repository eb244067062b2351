//! Request façade over the resource tree.

use serde::Serialize;
use tokio::io::AsyncWrite;

use projtree_core::{
    ListingEntry, ProjectMembershipOracle, ResourceNode, Resolved, TreeConfig, TreeError,
};

use crate::content::{ContentStream, ContentStreamer};
use crate::display_name::DisplayNameResolver;
use crate::listing::DirectoryListingBuilder;
use crate::resolver::PathResolver;
use crate::writer::{ContentWriter, WriteOutcome};

/// What a read request should do with a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadPlan {
    /// List the directory.
    List(ResourceNode),
    /// Stream the file.
    Stream(ResourceNode),
}

/// What a write request should do with a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePlan {
    /// Replace the file's content.
    Replace(ResourceNode),
    /// Leave the filesystem untouched.
    Skip,
}

/// Decide how to serve a read of `resolved`.
pub fn plan_read(resolved: Resolved) -> Result<ReadPlan, TreeError> {
    match resolved {
        Resolved::Directory(node) => Ok(ReadPlan::List(node)),
        Resolved::File(node) => Ok(ReadPlan::Stream(node)),
        Resolved::Other(node) => Err(TreeError::NotAFile {
            path: node.physical,
        }),
        Resolved::Missing(node) => Err(TreeError::NotFound {
            path: node.physical,
        }),
    }
}

/// Decide how to serve a write to `resolved`.
pub fn plan_write(resolved: Resolved) -> WritePlan {
    match resolved {
        Resolved::File(node) => WritePlan::Replace(node),
        Resolved::Directory(_) | Resolved::Other(_) | Resolved::Missing(_) => WritePlan::Skip,
    }
}

/// Result of a read that wrote file content to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReadOutcome {
    /// The path was a directory.
    Listing { entries: Vec<ListingEntry> },
    /// The path was a file and this many bytes went to the sink.
    Content { bytes_written: u64 },
}

/// Result of a read that hands the file body back to the caller.
#[derive(Debug)]
pub enum ReadResponse {
    /// The path was a directory.
    Listing(Vec<ListingEntry>),
    /// The path was a file.
    Content(ContentStream),
}

/// Serves reads and writes against the resource tree.
pub struct ResourceTreeService<O> {
    resolver: PathResolver,
    listings: DirectoryListingBuilder,
    streamer: ContentStreamer,
    writer: ContentWriter,
    oracle: O,
}

impl<O: ProjectMembershipOracle> ResourceTreeService<O> {
    /// Create a service from configuration.
    pub fn new(config: &TreeConfig, oracle: O) -> Result<Self, TreeError> {
        config.validate()?;

        let resolver = PathResolver::new(&config.root)?;
        let display_names = DisplayNameResolver::new(resolver.clone(), config.marker_file.clone());

        Ok(Self {
            listings: DirectoryListingBuilder::new(resolver.clone(), display_names),
            streamer: ContentStreamer::new(resolver.clone(), config.chunk_size),
            writer: ContentWriter::new(resolver.clone()),
            resolver,
            oracle,
        })
    }

    /// The path resolver in use.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// List a directory as seen by `identity`.
    pub async fn list(&self, identity: &str, raw: &str) -> Result<Vec<ListingEntry>, TreeError> {
        let access = self.oracle.accessible_project_names(identity);
        self.listings.build(raw, &access).await
    }

    /// Serve a read: list a directory or stream a file into `sink`.
    ///
    /// Nothing is written to `sink` unless the path is a file.
    pub async fn read<W>(
        &self,
        identity: &str,
        raw: &str,
        sink: &mut W,
    ) -> Result<ReadOutcome, TreeError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let resolved = self.resolver.inspect(raw).await?;
        tracing::debug!(identity, path = %resolved.node().logical, "read request");

        match plan_read(resolved)? {
            ReadPlan::List(node) => {
                let entries = self.list_node(identity, &node).await?;
                Ok(ReadOutcome::Listing { entries })
            }
            ReadPlan::Stream(node) => {
                let bytes_written = self.streamer.stream_node(&node, sink).await?;
                Ok(ReadOutcome::Content { bytes_written })
            }
        }
    }

    /// Serve a read, handing file content back as a stream with its length.
    pub async fn fetch(&self, identity: &str, raw: &str) -> Result<ReadResponse, TreeError> {
        let resolved = self.resolver.inspect(raw).await?;
        tracing::debug!(identity, path = %resolved.node().logical, "fetch request");

        match plan_read(resolved)? {
            ReadPlan::List(node) => Ok(ReadResponse::Listing(
                self.list_node(identity, &node).await?,
            )),
            ReadPlan::Stream(node) => Ok(ReadResponse::Content(
                self.streamer.open_node(&node).await?,
            )),
        }
    }

    /// Serve a write: replace the content of an existing file.
    pub async fn write(
        &self,
        identity: &str,
        raw: &str,
        content: &[u8],
    ) -> Result<WriteOutcome, TreeError> {
        let resolved = self.resolver.inspect(raw).await?;
        tracing::debug!(identity, path = %resolved.node().logical, "write request");

        match plan_write(resolved) {
            WritePlan::Replace(node) => self.writer.replace(&node, content).await,
            WritePlan::Skip => Ok(WriteOutcome::Noop),
        }
    }

    async fn list_node(
        &self,
        identity: &str,
        node: &ResourceNode,
    ) -> Result<Vec<ListingEntry>, TreeError> {
        let access = self.oracle.accessible_project_names(identity);
        self.listings.build_node(node, &access).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projtree_core::LogicalPath;

    fn node(raw: &str) -> ResourceNode {
        let logical = LogicalPath::parse(raw).unwrap();
        let physical = logical.to_physical(std::path::Path::new("/srv"));
        ResourceNode::new(logical, physical)
    }

    #[test]
    fn test_plan_read() {
        let dir = node("projA");
        assert_eq!(
            plan_read(Resolved::Directory(dir.clone())).unwrap(),
            ReadPlan::List(dir)
        );

        let file = node("projA/run.job");
        assert_eq!(
            plan_read(Resolved::File(file.clone())).unwrap(),
            ReadPlan::Stream(file)
        );

        assert!(matches!(
            plan_read(Resolved::Missing(node("gone"))),
            Err(TreeError::NotFound { .. })
        ));
        assert!(matches!(
            plan_read(Resolved::Other(node("projA/fifo"))),
            Err(TreeError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_plan_write() {
        let file = node("projA/run.job");
        assert_eq!(
            plan_write(Resolved::File(file.clone())),
            WritePlan::Replace(file)
        );
        assert_eq!(plan_write(Resolved::Directory(node("projA"))), WritePlan::Skip);
        assert_eq!(plan_write(Resolved::Missing(node("projA/new"))), WritePlan::Skip);
        assert_eq!(plan_write(Resolved::Other(node("projA/fifo"))), WritePlan::Skip);
    }
}
