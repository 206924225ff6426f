//! Discovered catkin packages.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A catkin package: its project name and absolute source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    source_dir: PathBuf,
}

impl Package {
    pub fn new(name: impl Into<String>, source_dir: impl Into<PathBuf>) -> Self {
        Package {
            name: name.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Path of the link created inside the source directory.
    pub fn link_path(&self, metadata_file: &str) -> PathBuf {
        self.source_dir.join(metadata_file)
    }

    /// Path of the metadata file in the build space.
    pub fn metadata_path(&self, build_space: &Path, metadata_file: &str) -> PathBuf {
        build_space.join(&self.name).join(metadata_file)
    }
}

/// Packages keyed by name, in discovery order.
///
/// Inserting a name that is already present replaces its source directory
/// but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct PackageSet {
    packages: Vec<Package>,
    index: HashMap<String, usize>,
}

impl PackageSet {
    pub fn new() -> Self {
        PackageSet::default()
    }

    /// Insert a package, returning the source directory it replaced.
    pub fn insert(&mut self, package: Package) -> Option<PathBuf> {
        match self.index.get(package.name()) {
            Some(&i) => {
                let old = std::mem::replace(&mut self.packages[i], package);
                Some(old.source_dir)
            }
            None => {
                self.index
                    .insert(package.name().to_string(), self.packages.len());
                self.packages.push(package);
                None
            }
        }
    }

    /// Look up a package by name.
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.index.get(name).map(|&i| &self.packages[i])
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    pub fn as_slice(&self) -> &[Package] {
        &self.packages
    }
}

impl<'a> IntoIterator for &'a PackageSet {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

impl FromIterator<Package> for PackageSet {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut set = PackageSet::new();
        for package in iter {
            set.insert(package);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_paths() {
        let pkg = Package::new("foo_pkg", "/ws/src/foo_pkg");

        assert_eq!(
            pkg.link_path("compile_commands.json"),
            PathBuf::from("/ws/src/foo_pkg/compile_commands.json")
        );
        assert_eq!(
            pkg.metadata_path(Path::new("/ws/build"), "compile_commands.json"),
            PathBuf::from("/ws/build/foo_pkg/compile_commands.json")
        );
    }

    #[test]
    fn test_duplicate_name_last_seen_wins() {
        let mut set = PackageSet::new();
        assert_eq!(set.insert(Package::new("a", "/src/a")), None);
        assert_eq!(set.insert(Package::new("b", "/src/b")), None);
        assert_eq!(
            set.insert(Package::new("a", "/src/vendor/a")),
            Some(PathBuf::from("/src/a"))
        );

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a").unwrap().source_dir(), Path::new("/src/vendor/a"));
        let names: Vec<_> = set.iter().map(Package::name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_from_iter() {
        let set: PackageSet = [Package::new("x", "/x"), Package::new("y", "/y")]
            .into_iter()
            .collect();

        assert!(!set.is_empty());
        assert!(set.get("y").is_some());
        assert!(set.get("z").is_none());
    }
}
