//! Tree view settings
//!
//! Settings are stored as JSON under the platform config directory and fall
//! back to defaults when missing or unreadable.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// When the tree cache throws away its traversal and starts over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildTrigger {
    /// Only when the resolved root changes identity.
    ///
    /// A subtree that changes shape under the same root is not noticed and
    /// trips a structural mismatch once the traversal outgrows the cache.
    RootChange,
    /// When the root changes, or when the live pre-order sequence no longer
    /// matches the cached one. Fold flags of surviving nodes are kept.
    #[default]
    RootOrShapeChange,
}

/// Tree view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewConfig {
    pub rebuild_trigger: RebuildTrigger,
    /// Caption of the per-row selection button
    pub select_label: String,
    /// Paint a highlight behind the selected node's row
    pub highlight_selected: bool,
    /// Horizontal space per nesting level, in points
    pub indent_width: f32,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            rebuild_trigger: RebuildTrigger::default(),
            select_label: constants::tree::DEFAULT_SELECT_LABEL.to_string(),
            highlight_selected: true,
            indent_width: constants::tree::DEFAULT_INDENT_WIDTH,
        }
    }
}

impl TreeViewConfig {
    /// Default settings location, e.g. `~/.config/scene-tree-inspector/tree_view.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::config::CONFIG_DIR_NAME)
                .join(constants::config::CONFIG_FILE_NAME)
        })
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings as pretty JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("⚙️ Loaded tree view settings from {}", path.display());
                config
            }
            Err(e) => {
                warn!("⚙️ {}; using default tree view settings", e);
                Self::default()
            }
        }
    }
}
