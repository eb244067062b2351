//! Filesystem-backed resource tree for projtree.
//!
//! This crate serves browse and edit requests against directories that
//! live under a single configured root. Each directory directly under the
//! root is a project; callers only see the projects their identity grants
//! access to, and everything beneath a visible project is visible too.
//!
//! # Overview
//!
//! - [`PathResolver`] maps logical paths to physical ones and rejects
//!   anything that escapes the root
//! - [`DisplayNameResolver`] reads a project's display name from its
//!   marker file
//! - [`DirectoryListingBuilder`] lists one directory level at a time
//! - [`ContentStreamer`] copies file content to a sink in fixed-size chunks
//! - [`ContentWriter`] replaces the content of existing files
//! - [`ResourceTreeService`] routes requests to the above
//!
//! # Example
//!
//! ```rust,no_run
//! use projtree_core::{StaticMembership, TreeConfig};
//! use projtree_fs::{ReadOutcome, ResourceTreeService};
//!
//! # async fn run() -> Result<(), projtree_core::TreeError> {
//! let members = StaticMembership::new().with_member("azkaban", ["Alpha"]);
//! let service = ResourceTreeService::new(&TreeConfig::new("/srv/projects"), members)?;
//!
//! let mut stdout = tokio::io::stdout();
//! match service.read("azkaban", "/", &mut stdout).await? {
//!     ReadOutcome::Listing { entries } => {
//!         for entry in entries {
//!             println!("{} {}", entry.kind, entry.label);
//!         }
//!     }
//!     ReadOutcome::Content { bytes_written } => eprintln!("{bytes_written} bytes"),
//! }
//! # Ok(())
//! # }
//! ```

mod content;
mod display_name;
mod listing;
mod resolver;
mod service;
mod writer;

pub use content::{ContentStream, ContentStreamer};
pub use display_name::DisplayNameResolver;
pub use listing::DirectoryListingBuilder;
pub use resolver::PathResolver;
pub use service::{
    ReadOutcome, ReadPlan, ReadResponse, ResourceTreeService, WritePlan, plan_read, plan_write,
};
pub use writer::{ContentWriter, WriteOutcome};

// Re-export core types for convenience
pub use projtree_core::{
    EntryKind, ListingEntry, LogicalPath, ProjectAccessSet, ProjectMembershipOracle,
    ResourceNode, Resolved, StaticMembership, TreeConfig, TreeError,
};
