//! Core types and traits for projtree.
//!
//! This crate provides the data model shared by the projtree crates:
//! logical paths, resolved nodes, listing entries, project access sets,
//! the membership oracle trait, configuration, and the error taxonomy.

mod access;
mod config;
mod entry;
mod error;
mod node;
mod path;

pub use access::{ProjectAccessSet, ProjectMembershipOracle, StaticMembership};
pub use config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MARKER_FILE, ProjtreeSettings, TreeConfig, TreeConfigBuilder,
};
pub use entry::{EntryKind, ListingEntry, PARENT_LABEL};
pub use error::TreeError;
pub use node::{ResourceNode, Resolved};
pub use path::LogicalPath;
