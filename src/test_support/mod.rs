//! Test fixtures for catkin workspaces.
//!
//! # Example
//!
//! ```rust,ignore
//! use catkin_link::test_support::WorkspaceFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = WorkspaceFixture::new().package("a").built("a").package("b");
//!     // src/a and src/b exist, only build/a/compile_commands.json exists
//! }
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// `CMakeLists.txt` contents for a catkin package named `name`.
pub fn catkin_cmake_lists(name: &str) -> String {
    format!(
        r#"cmake_minimum_required(VERSION 3.0.2)
project({name})

find_package(catkin REQUIRED COMPONENTS
  roscpp
  std_msgs
)

catkin_package()

include_directories(${{catkin_INCLUDE_DIRS}})
add_executable(${{PROJECT_NAME}}_node src/{name}_node.cpp)
"#
    )
}

/// A temporary catkin_tools workspace.
///
/// A fresh fixture has `.catkin_tools/profiles/default/`, `build/` and
/// `src/`, which is what `catkin init` followed by `catkin build` leaves
/// behind. The directory is removed when the fixture is dropped.
pub struct WorkspaceFixture {
    tmp: TempDir,
}

impl WorkspaceFixture {
    /// Create a new workspace with all markers present.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path();
        for dir in [".catkin_tools/profiles/default", "build", "src"] {
            std::fs::create_dir_all(root.join(dir)).expect("create workspace dir");
        }
        WorkspaceFixture { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root().join("build")
    }

    /// Add a catkin package at `src/<name>`.
    pub fn package(self, name: &str) -> Self {
        self.package_at(name, name)
    }

    /// Add a catkin package `name` at `src/<rel_dir>`.
    pub fn package_at(self, rel_dir: &str, name: &str) -> Self {
        let path = format!("src/{}/CMakeLists.txt", rel_dir);
        self.file(&path, &catkin_cmake_lists(name))
    }

    /// Add `build/<name>/compile_commands.json`.
    pub fn built(self, name: &str) -> Self {
        let path = format!("build/{}/compile_commands.json", name);
        self.file(&path, "[]\n")
    }

    /// Write a file relative to the workspace root, creating parents.
    pub fn file(self, rel_path: &str, contents: &str) -> Self {
        let full_path = self.root().join(rel_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&full_path, contents).expect("write fixture file");
        self
    }

    /// Write `profiles.yaml` selecting `name` as the active profile.
    pub fn set_active_profile(&self, name: &str) {
        let path = self.root().join(".catkin_tools/profiles/profiles.yaml");
        std::fs::write(path, format!("active: {}\n", name)).expect("write profiles.yaml");
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write an executable shell script standing in for `catkin`.
///
/// The script ignores its arguments and runs `body`.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-catkin");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake tool");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = WorkspaceFixture::new().package("a").built("a");

        assert!(fixture.root().join(".catkin_tools/profiles/default").is_dir());
        assert!(fixture.src_dir().join("a/CMakeLists.txt").is_file());
        assert!(fixture.build_dir().join("a/compile_commands.json").is_file());
    }

    #[test]
    fn test_catkin_cmake_lists_escapes_braces() {
        let contents = catkin_cmake_lists("demo");
        assert!(contents.contains("project(demo)"));
        assert!(contents.contains("${catkin_INCLUDE_DIRS}"));
    }
}
