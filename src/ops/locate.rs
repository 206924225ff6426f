//! Build space location via `catkin locate -b`.
//!
//! `catkin locate` finds the workspace from the current working directory,
//! so the tool runs with the process working directory temporarily set to
//! the workspace root. The change is held by a [`WorkingDirGuard`] and is
//! undone before this function returns, whether the tool succeeded or not.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::errors::CatkinError;
use crate::core::CatkinWorkspace;
use crate::util::fs::{absolute_path, WorkingDirGuard};
use crate::util::process::{find_executable, ProcessBuilder};

/// Arguments that make catkin print the active build space.
pub const LOCATE_ARGS: [&str; 2] = ["locate", "-b"];

/// Ask `tool` for the active build space of `ws`.
///
/// Returns `Ok(None)` if the tool ran successfully but printed nothing.
/// A relative path printed by the tool is taken relative to the workspace
/// root.
pub fn locate_build_space(ws: &CatkinWorkspace, tool: &str) -> Result<Option<PathBuf>> {
    // Resolve before changing directory so relative tool paths keep working.
    let tool_path = find_executable(tool)
        .map(|p| absolute_path(&p))
        .ok_or_else(|| CatkinError::ToolNotFound {
            tool: tool.to_string(),
        })?;

    let cmd = ProcessBuilder::new(&tool_path).args(LOCATE_ARGS);
    tracing::debug!("running `{}` in {}", cmd.display_command(), ws.root().display());

    let output = {
        let _guard =
            WorkingDirGuard::change_to(ws.root()).map_err(|e| CatkinError::io(ws.root(), e))?;
        cmd.exec()?
    };

    if !output.status.success() {
        return Err(CatkinError::ToolFailed {
            command: cmd.display_command(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        tracing::debug!("`{}` printed no build space", cmd.display_command());
        return Ok(None);
    }

    Ok(Some(ws.root().join(trimmed)))
}
