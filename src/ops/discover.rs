//! Package discovery in the source space.
//!
//! A directory is a catkin package when its `CMakeLists.txt` has a
//! line-leading `find_package(catkin ...)`. The package name is taken from
//! the line-leading `project(<name>)` call. Packages are not nested, so the
//! walk never descends into a directory once it has been identified.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::core::{Package, PackageSet};
use crate::util::fs::read_to_string;

/// Build-description file inspected in each directory.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

static FIND_CATKIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^find_package\s*\(\s*catkin\b").expect("valid regex")
});

static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^project\s*\(\s*([A-Za-z0-9_.+\-]+)").expect("valid regex")
});

/// Result of inspecting one `CMakeLists.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmakeKind {
    /// Not a catkin package.
    Plain,
    /// Depends on catkin but declares no recognizable project name.
    Unnamed,
    /// A catkin package with the given name.
    Catkin(String),
}

/// Classify the contents of a `CMakeLists.txt`.
pub fn classify_cmake_lists(contents: &str) -> CmakeKind {
    if !FIND_CATKIN_RE.is_match(contents) {
        return CmakeKind::Plain;
    }

    match PROJECT_RE.captures(contents) {
        Some(caps) => CmakeKind::Catkin(caps[1].to_string()),
        None => CmakeKind::Unnamed,
    }
}

/// Walk `src_dir` and collect every catkin package beneath it.
///
/// Symlinks are followed. Entries are visited in file-name order so the
/// result is deterministic. Unreadable directories and files are logged and
/// skipped.
pub fn discover_packages(src_dir: &Path) -> PackageSet {
    let mut packages = PackageSet::new();

    let mut walker = WalkDir::new(src_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let cmake_lists = dir.join(CMAKE_LISTS);
        if !cmake_lists.is_file() {
            continue;
        }

        let contents = match read_to_string(&cmake_lists) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("{:#}", e);
                continue;
            }
        };

        match classify_cmake_lists(&contents) {
            CmakeKind::Plain => {
                tracing::trace!("{} does not use catkin", cmake_lists.display());
            }
            CmakeKind::Unnamed => {
                tracing::warn!(
                    "no project name found in {}, skipping",
                    cmake_lists.display()
                );
                walker.skip_current_dir();
            }
            CmakeKind::Catkin(name) => {
                tracing::debug!("found package `{}` in {}", name, dir.display());
                let package = Package::new(name, dir.to_path_buf());
                if let Some(previous) = packages.insert(package) {
                    tracing::debug!(
                        "package name seen twice, replacing {}",
                        previous.display()
                    );
                }
                walker.skip_current_dir();
            }
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catkin_cmake_lists, WorkspaceFixture};
    use std::path::PathBuf;

    #[test]
    fn test_classify_catkin_package() {
        let contents = "cmake_minimum_required(VERSION 3.0.2)\n\
                        project(foo_pkg)\n\
                        find_package(catkin REQUIRED COMPONENTS roscpp)\n";

        assert_eq!(
            classify_cmake_lists(contents),
            CmakeKind::Catkin("foo_pkg".to_string())
        );
    }

    #[test]
    fn test_classify_ignores_non_catkin() {
        let contents = "project(plain_lib)\nfind_package(Boost REQUIRED)\n";
        assert_eq!(classify_cmake_lists(contents), CmakeKind::Plain);

        // Indented or commented calls are not line-leading.
        let contents = "project(x)\n  find_package(catkin REQUIRED)\n# find_package(catkin)\n";
        assert_eq!(classify_cmake_lists(contents), CmakeKind::Plain);

        // catkin_simple is a different package.
        let contents = "project(x)\nfind_package(catkin_simple REQUIRED)\n";
        assert_eq!(classify_cmake_lists(contents), CmakeKind::Plain);
    }

    #[test]
    fn test_classify_unnamed() {
        let contents = "find_package(catkin REQUIRED)\nproject(${NAME})\n";
        assert_eq!(classify_cmake_lists(contents), CmakeKind::Unnamed);
    }

    #[test]
    fn test_classify_whitespace_variants() {
        let contents = "project( spaced_pkg LANGUAGES CXX )\nfind_package( catkin )\n";
        assert_eq!(
            classify_cmake_lists(contents),
            CmakeKind::Catkin("spaced_pkg".to_string())
        );
    }

    #[test]
    fn test_discover_records_catkin_packages() {
        let fixture = WorkspaceFixture::new()
            .package("foo_pkg")
            .package_at("group/bar_pkg", "bar_pkg")
            .file("src/plain/CMakeLists.txt", "project(plain)\n");

        let packages = discover_packages(&fixture.src_dir());

        assert_eq!(packages.len(), 2);
        assert_eq!(
            packages.get("foo_pkg").unwrap().source_dir(),
            fixture.src_dir().join("foo_pkg")
        );
        assert_eq!(
            packages.get("bar_pkg").unwrap().source_dir(),
            fixture.src_dir().join("group/bar_pkg")
        );
        assert!(packages.get("plain").is_none());
    }

    #[test]
    fn test_discover_does_not_descend_into_packages() {
        let fixture = WorkspaceFixture::new()
            .package("outer")
            .file("src/outer/test/inner/CMakeLists.txt", &catkin_cmake_lists("inner"));

        let packages = discover_packages(&fixture.src_dir());

        assert_eq!(packages.len(), 1);
        assert!(packages.get("outer").is_some());
        assert!(packages.get("inner").is_none());
    }

    #[test]
    fn test_discover_descends_into_plain_cmake_dirs() {
        let fixture = WorkspaceFixture::new()
            .file("src/meta/CMakeLists.txt", "project(meta)\n")
            .package_at("meta/child", "child");

        let packages = discover_packages(&fixture.src_dir());
        assert!(packages.get("child").is_some());
    }

    #[test]
    fn test_discover_duplicate_names_last_seen_wins() {
        let fixture = WorkspaceFixture::new()
            .package_at("a_copy", "dup")
            .package_at("b_copy", "dup");

        let packages = discover_packages(&fixture.src_dir());

        assert_eq!(packages.len(), 1);
        assert_eq!(
            packages.get("dup").unwrap().source_dir(),
            fixture.src_dir().join("b_copy")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinks() {
        let fixture = WorkspaceFixture::new();
        let external = tempfile::TempDir::new().unwrap();
        let pkg_dir = external.path().join("linked_pkg");
        std::fs::create_dir_all(&pkg_dir).unwrap();
        std::fs::write(pkg_dir.join(CMAKE_LISTS), catkin_cmake_lists("linked_pkg")).unwrap();
        std::os::unix::fs::symlink(&pkg_dir, fixture.src_dir().join("linked_pkg")).unwrap();

        let packages = discover_packages(&fixture.src_dir());

        let pkg = packages.get("linked_pkg").unwrap();
        assert_eq!(pkg.source_dir(), fixture.src_dir().join("linked_pkg"));
    }

    #[test]
    fn test_discover_missing_src_dir() {
        let packages = discover_packages(&PathBuf::from("/nonexistent/catkin/src"));
        assert!(packages.is_empty());
    }
}
