//! Project membership and access sets.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Project names a caller may see.
///
/// Names are compared against project display names, not raw folder names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectAccessSet(HashSet<String>);

impl ProjectAccessSet {
    /// An empty set that grants nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a project is accessible.
    pub fn contains(&self, project: &str) -> bool {
        self.0.contains(project)
    }

    /// Number of accessible projects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is accessible.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ProjectAccessSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Source of per-caller project membership.
///
/// Queried once per request; results are never cached by the tree service.
pub trait ProjectMembershipOracle: Send + Sync {
    /// Names of the projects `identity` may access.
    fn accessible_project_names(&self, identity: &str) -> ProjectAccessSet;
}

impl<F> ProjectMembershipOracle for F
where
    F: Fn(&str) -> ProjectAccessSet + Send + Sync,
{
    fn accessible_project_names(&self, identity: &str) -> ProjectAccessSet {
        self(identity)
    }
}

/// Membership table loaded from configuration.
///
/// Unknown identities get an empty access set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticMembership {
    members: HashMap<String, Vec<String>>,
}

impl StaticMembership {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `identity` access to `projects`.
    pub fn with_member<I, S>(mut self, identity: impl Into<String>, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members
            .entry(identity.into())
            .or_default()
            .extend(projects.into_iter().map(Into::into));
        self
    }

    /// Number of identities in the table.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl ProjectMembershipOracle for StaticMembership {
    fn accessible_project_names(&self, identity: &str) -> ProjectAccessSet {
        self.members
            .get(identity)
            .map(|projects| projects.iter().cloned().collect())
            .unwrap_or_default()
    }
}
