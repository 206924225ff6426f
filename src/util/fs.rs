//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Make a path absolute relative to the current directory without resolving symlinks.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Scoped change of the process working directory.
///
/// The previous directory is captured on creation and restored on drop,
/// including during unwinding. The working directory is process-wide, so
/// nothing else may rely on relative paths while a guard is alive.
#[derive(Debug)]
#[must_use = "the working directory is restored as soon as the guard is dropped"]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    /// Change into `dir`, remembering the current directory.
    pub fn change_to(dir: &Path) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        tracing::trace!("changed directory to {}", dir.display());
        Ok(WorkingDirGuard { previous })
    }

    /// The directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::error!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

/// Create a symlink at `dst` pointing to `src`, replacing whatever file or
/// link is already there (`ln -sf`).
///
/// Returns the previous link target when an existing symlink was replaced.
/// Directories at `dst` are never removed.
pub fn force_symlink(src: &Path, dst: &Path) -> io::Result<Option<PathBuf>> {
    let previous = match fs::symlink_metadata(dst) {
        Ok(meta) if meta.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", dst.display()),
            ));
        }
        Ok(meta) => {
            let previous = if meta.file_type().is_symlink() {
                fs::read_link(dst).ok()
            } else {
                None
            };
            fs::remove_file(dst)?;
            previous
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    symlink(src, dst)?;
    Ok(previous)
}
