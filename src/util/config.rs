//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/catkin-link/config.toml` - user-wide defaults
//! - Workspace: `.catkin_tools/catkin_link.toml` - workspace overrides
//!
//! Workspace config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default name of the catkin_tools executable.
pub const DEFAULT_TOOL: &str = "catkin";

/// Default name of the per-package compile metadata file.
pub const DEFAULT_METADATA_FILE: &str = "compile_commands.json";

/// Name of the workspace-level config file inside `.catkin_tools/`.
pub const WORKSPACE_CONFIG_NAME: &str = "catkin_link.toml";

/// catkin-link configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// catkin executable used for `locate -b` (name on PATH or a path)
    pub tool: Option<String>,

    /// Metadata file name looked up in each package build directory
    pub metadata_file: Option<String>,

    /// Treat a malformed workspace or a missing build space as fatal
    pub strict: Option<bool>,

    /// Threads used for linking (None = rayon default)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.tool.is_some() {
            self.tool = other.tool;
        }
        if other.metadata_file.is_some() {
            self.metadata_file = other.metadata_file;
        }
        if other.strict.is_some() {
            self.strict = other.strict;
        }
        if other.jobs.is_some() {
            self.jobs = other.jobs;
        }
    }

    /// The catkin executable to run.
    pub fn tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Whether strict mode is on (off unless a config file enables it).
    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    /// The metadata file name to link.
    pub fn metadata_file(&self) -> &str {
        self.metadata_file.as_deref().unwrap_or(DEFAULT_METADATA_FILE)
    }
}

/// Load merged configuration from global and workspace locations.
///
/// Order of precedence (highest to lowest):
/// 1. Workspace config (.catkin_tools/catkin_link.toml)
/// 2. Global config (<config dir>/catkin-link/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, workspace_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(workspace_path));

    config
}

/// Get the global config path (`<config dir>/catkin-link/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "catkin-link")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the workspace config path (`.catkin_tools/catkin_link.toml`).
pub fn workspace_config_path(marker_dir: &Path) -> PathBuf {
    marker_dir.join(WORKSPACE_CONFIG_NAME)
}
