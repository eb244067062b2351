//! Tree and settings configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{StaticMembership, TreeError};

/// Default name of the file holding a project's display name.
pub const DEFAULT_MARKER_FILE: &str = "projectname";

/// Default read buffer size for streaming file content.
pub const DEFAULT_CHUNK_SIZE: usize = 2 * 8192;

/// Configuration for the resource tree.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TreeConfig {
    /// Directory all logical paths are relative to.
    pub root: PathBuf,

    /// Name of the display-name marker file inside each project root.
    #[builder(default = "DEFAULT_MARKER_FILE.to_string()")]
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Read buffer size used when streaming file content.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl TreeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(ref marker) = self.marker_file {
            if marker.is_empty() || marker.contains('/') {
                return Err(format!("Invalid marker file name: {marker:?}"));
            }
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl TreeConfig {
    /// Create a new tree config builder.
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    /// Create a simple config rooted at a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            marker_file: default_marker_file(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Check values that serde defaults cannot enforce.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.root.as_os_str().is_empty() {
            return Err(invalid_config("Root path cannot be empty"));
        }
        if self.marker_file.is_empty() || self.marker_file.contains('/') {
            return Err(invalid_config(format!(
                "Invalid marker file name: {:?}",
                self.marker_file
            )));
        }
        if self.chunk_size == 0 {
            return Err(invalid_config("Chunk size must be greater than zero"));
        }
        Ok(())
    }
}

/// Contents of the settings file.
///
/// ```toml
/// [tree]
/// root = "/srv/projects"
/// marker_file = "projectname"
///
/// [members]
/// azkaban = ["Alpha", "Beta"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjtreeSettings {
    /// Resource tree configuration.
    pub tree: TreeConfig,

    /// Identity to project-name table.
    #[serde(default)]
    pub members: StaticMembership,
}

impl ProjtreeSettings {
    /// Default settings file location (`<config dir>/projtree/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("projtree")
            .join("config.toml")
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, TreeError> {
        let settings: Self = toml::from_str(text).map_err(|e| invalid_config(e.to_string()))?;
        settings.tree.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let text = std::fs::read_to_string(path).map_err(|e| TreeError::io(path, e))?;
        Self::from_toml(&text)
    }
}

fn invalid_config(message: impl Into<String>) -> TreeError {
    TreeError::InvalidConfig {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TreeConfig::builder()
            .root("/srv/projects")
            .chunk_size(4096usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/srv/projects"));
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.marker_file, DEFAULT_MARKER_FILE);
    }

    #[test]
    fn test_config_builder_rejects_invalid() {
        assert!(TreeConfig::builder().build().is_err());
        assert!(TreeConfig::builder().root("").build().is_err());
        assert!(
            TreeConfig::builder()
                .root("/srv")
                .chunk_size(0usize)
                .build()
                .is_err()
        );
        assert!(
            TreeConfig::builder()
                .root("/srv")
                .marker_file("a/b")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_config_simple() {
        let config = TreeConfig::new("/srv/projects");
        assert_eq!(config.chunk_size, 16384);
        assert!(config.validate().is_ok());
    }
}
