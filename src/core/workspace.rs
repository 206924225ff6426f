//! Workspace - the catkin_tools workspace root and its well-known paths.
//!
//! A catkin_tools workspace is recognized by three marker paths directly
//! under its root:
//! - `.catkin_tools/` - tool metadata, including profiles
//! - `build/` - the default build space
//! - `src/` - the source space

use std::path::{Path, PathBuf};

use crate::core::errors::CatkinError;
use crate::util::config::workspace_config_path;
use crate::util::fs::absolute_path;

/// Name of the catkin_tools metadata directory.
pub const MARKER_DIR: &str = ".catkin_tools";

/// Name of the default build space directory.
pub const BUILD_DIR: &str = "build";

/// Name of the source space directory.
pub const SRC_DIR: &str = "src";

/// A catkin_tools workspace rooted at an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatkinWorkspace {
    root: PathBuf,
}

impl CatkinWorkspace {
    /// Create a workspace handle for `root`.
    ///
    /// Relative paths are made absolute against the current directory.
    /// Nothing is checked on disk; see [`CatkinWorkspace::validate`].
    pub fn new(root: impl AsRef<Path>) -> Self {
        CatkinWorkspace {
            root: absolute_path(root.as_ref()),
        }
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the `.catkin_tools` directory.
    pub fn marker_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Get the default build space (`build/`).
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Get the source space (`src/`).
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    /// Get the directory holding profile declarations.
    pub fn profiles_dir(&self) -> PathBuf {
        self.marker_dir().join("profiles")
    }

    /// Get the profile declaration file.
    pub fn profiles_file(&self) -> PathBuf {
        self.profiles_dir().join("profiles.yaml")
    }

    /// Get the workspace-level catkin-link config file.
    pub fn config_path(&self) -> PathBuf {
        workspace_config_path(&self.marker_dir())
    }

    /// The three marker paths, in the order they are reported.
    pub fn markers(&self) -> [PathBuf; 3] {
        [self.marker_dir(), self.build_dir(), self.src_dir()]
    }

    /// Marker paths that do not exist.
    pub fn missing_markers(&self) -> Vec<PathBuf> {
        self.markers().into_iter().filter(|p| !p.exists()).collect()
    }

    /// Check whether all three marker paths exist.
    pub fn is_valid(&self) -> bool {
        self.missing_markers().is_empty()
    }

    /// Validate the workspace layout.
    pub fn validate(&self) -> Result<(), CatkinError> {
        let missing = self.missing_markers();
        if missing.is_empty() {
            tracing::debug!("{} is a catkin workspace", self.root.display());
            Ok(())
        } else {
            Err(CatkinError::MalformedWorkspace {
                root: self.root.clone(),
                missing,
            })
        }
    }
}
