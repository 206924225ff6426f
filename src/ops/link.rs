//! Linking compile metadata into package source directories.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::core::Package;
use crate::util::fs::force_symlink;

/// Options for linking.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Metadata file name, both in the build space and in the source dir
    pub metadata_file: String,

    /// Report what would be linked without touching the filesystem
    pub dry_run: bool,

    /// Threads used for linking (None = rayon default)
    pub jobs: Option<usize>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        LinkOptions {
            metadata_file: crate::util::config::DEFAULT_METADATA_FILE.to_string(),
            dry_run: false,
            jobs: None,
        }
    }
}

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link was created. `previous` is the old target of a replaced link.
    Linked {
        package: String,
        link: PathBuf,
        target: PathBuf,
        previous: Option<PathBuf>,
    },
    /// Dry run: the link would have been created.
    Planned {
        package: String,
        link: PathBuf,
        target: PathBuf,
    },
    /// The package has not produced a metadata file yet.
    MissingMetadata { package: String, expected: PathBuf },
    /// The package source directory no longer exists.
    MissingSource { package: String, source_dir: PathBuf },
    /// Creating the link failed.
    Failed {
        package: String,
        link: PathBuf,
        error: String,
    },
}

impl LinkOutcome {
    /// Name of the package this outcome belongs to.
    pub fn package(&self) -> &str {
        match self {
            LinkOutcome::Linked { package, .. }
            | LinkOutcome::Planned { package, .. }
            | LinkOutcome::MissingMetadata { package, .. }
            | LinkOutcome::MissingSource { package, .. }
            | LinkOutcome::Failed { package, .. } => package,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, LinkOutcome::Linked { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LinkOutcome::Failed { .. })
    }
}

/// Link one package's metadata file from `build_space` into its source dir.
pub fn link_package(package: &Package, build_space: &Path, opts: &LinkOptions) -> LinkOutcome {
    let name = package.name().to_string();
    let target = package.metadata_path(build_space, &opts.metadata_file);

    if !target.is_file() {
        return LinkOutcome::MissingMetadata {
            package: name,
            expected: target,
        };
    }

    if !package.source_dir().is_dir() {
        return LinkOutcome::MissingSource {
            package: name,
            source_dir: package.source_dir().to_path_buf(),
        };
    }

    let link = package.link_path(&opts.metadata_file);

    if opts.dry_run {
        return LinkOutcome::Planned {
            package: name,
            link,
            target,
        };
    }

    match force_symlink(&target, &link) {
        Ok(previous) => {
            tracing::debug!("{} -> {}", link.display(), target.display());
            LinkOutcome::Linked {
                package: name,
                link,
                target,
                previous,
            }
        }
        Err(e) => LinkOutcome::Failed {
            package: name,
            link,
            error: e.to_string(),
        },
    }
}

/// Link every package, returning one outcome per package in input order.
///
/// Packages are independent of each other, so they are linked in parallel.
/// A failure for one package never stops the others.
pub fn link_packages(
    packages: &[Package],
    build_space: &Path,
    opts: &LinkOptions,
) -> Vec<LinkOutcome> {
    let run = || -> Vec<LinkOutcome> {
        packages
            .par_iter()
            .map(|pkg| link_package(pkg, build_space, opts))
            .collect()
    };

    match opts.jobs {
        Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                tracing::warn!("failed to build thread pool ({}), using the global pool", e);
                run()
            }
        },
        None => run(),
    }
}
