//! Error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while inspecting a catkin workspace.
#[derive(Debug, Error)]
pub enum CatkinError {
    #[error("`{}` is not a catkin workspace", root.display())]
    MalformedWorkspace { root: PathBuf, missing: Vec<PathBuf> },

    #[error("no profile declared in `{}`", profiles_dir.display())]
    NoProfile { profiles_dir: PathBuf },

    #[error("no active profile found in `{}`", path.display())]
    NoActiveProfile { path: PathBuf },

    #[error("could not find `{tool}` on PATH")]
    ToolNotFound { tool: String },

    #[error("`{command}` failed with exit code {code:?}")]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatkinError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatkinError::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            CatkinError::MalformedWorkspace { root, missing } => {
                let mut diag = diag.with_location(root);
                for path in missing {
                    diag = diag.with_context(format!("missing `{}`", path.display()));
                }
                let needs_build = missing.iter().all(|p| p.ends_with("build"));
                if needs_build {
                    diag.with_suggestion(suggestions::BUILD_WORKSPACE)
                } else {
                    diag.with_suggestion(suggestions::INIT_WORKSPACE)
                }
            }

            CatkinError::NoProfile { profiles_dir } => diag
                .with_location(profiles_dir)
                .with_context("neither `profiles.yaml` nor a `default` profile exists")
                .with_suggestion(suggestions::INIT_WORKSPACE),

            CatkinError::NoActiveProfile { path } => diag
                .with_location(path)
                .with_context("expected a line of the form `active: <name>`")
                .with_suggestion(suggestions::SET_PROFILE),

            CatkinError::ToolNotFound { .. } => diag
                .with_suggestion(suggestions::INSTALL_CATKIN)
                .with_suggestion(suggestions::PASS_BUILD_SPACE),

            CatkinError::ToolFailed { stderr, .. } => {
                let mut diag = diag;
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    diag = diag.with_context(line.trim());
                }
                diag.with_suggestion(suggestions::PASS_BUILD_SPACE)
            }

            CatkinError::Io { path, source } => {
                diag.with_location(path).with_context(source.to_string())
            }
        }
    }
}
