//! Chunked file content streaming.

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use projtree_core::{ResourceNode, Resolved, TreeError};

use crate::resolver::PathResolver;

/// An open file exposed as an async byte stream.
#[derive(Debug)]
pub struct ContentStream {
    /// Declared total length in bytes, taken from the open handle.
    pub length: u64,
    /// Chunked file body.
    pub body: ReaderStream<File>,
}

/// Copies file content to a sink without buffering the whole file.
#[derive(Debug, Clone)]
pub struct ContentStreamer {
    resolver: PathResolver,
    chunk_size: usize,
}

impl ContentStreamer {
    /// Create a streamer reading `chunk_size` bytes at a time.
    pub fn new(resolver: PathResolver, chunk_size: usize) -> Self {
        Self {
            resolver,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Stream the file at a logical path into `sink`.
    ///
    /// Returns the exact number of bytes written.
    pub async fn stream<W>(&self, raw: &str, sink: &mut W) -> Result<u64, TreeError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let node = self.require_file(raw).await?;
        self.stream_node(&node, sink).await
    }

    /// Stream an already resolved file into `sink`.
    pub async fn stream_node<W>(&self, node: &ResourceNode, sink: &mut W) -> Result<u64, TreeError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut file = File::open(&node.physical)
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?;

        let mut buffer = vec![0u8; self.chunk_size];
        let mut total: u64 = 0;

        loop {
            let len = file
                .read(&mut buffer)
                .await
                .map_err(|e| TreeError::io(&node.physical, e))?;
            if len == 0 {
                break;
            }
            sink.write_all(&buffer[..len])
                .await
                .map_err(|source| sink_error(node, source))?;
            total += len as u64;
        }

        sink.flush().await.map_err(|source| sink_error(node, source))?;

        tracing::debug!(path = %node.logical, bytes = total, "streamed file");
        Ok(total)
    }

    /// Open the file at a logical path as a byte stream with a declared length.
    pub async fn open(&self, raw: &str) -> Result<ContentStream, TreeError> {
        let node = self.require_file(raw).await?;
        self.open_node(&node).await
    }

    /// Open an already resolved file as a byte stream.
    pub async fn open_node(&self, node: &ResourceNode) -> Result<ContentStream, TreeError> {
        let file = File::open(&node.physical)
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| TreeError::io(&node.physical, e))?
            .len();

        Ok(ContentStream {
            length,
            body: ReaderStream::with_capacity(file, self.chunk_size),
        })
    }

    async fn require_file(&self, raw: &str) -> Result<ResourceNode, TreeError> {
        match self.resolver.inspect(raw).await? {
            Resolved::File(node) => Ok(node),
            Resolved::Missing(node) => Err(TreeError::NotFound {
                path: node.physical,
            }),
            Resolved::Directory(node) | Resolved::Other(node) => Err(TreeError::NotAFile {
                path: node.physical,
            }),
        }
    }
}

// Sink failures are never "not found" even if the writer reports that kind.
fn sink_error(node: &ResourceNode, source: std::io::Error) -> TreeError {
    TreeError::Io {
        path: node.physical.clone(),
        source,
    }
}
