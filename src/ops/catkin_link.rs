//! Implementation of a full `catkin-link` run.
//!
//! validate workspace -> resolve profile -> locate build space ->
//! discover packages -> link

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::errors::CatkinError;
use crate::core::{CatkinWorkspace, PackageSet, Profile};
use crate::ops::discover::discover_packages;
use crate::ops::link::{link_packages, LinkOptions, LinkOutcome};
use crate::ops::locate::locate_build_space;
use crate::util::config::DEFAULT_TOOL;
use crate::util::diagnostic;
use crate::util::fs::absolute_path;
use crate::util::shell::{Shell, Status};

/// Options for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// catkin executable used for `locate -b`
    pub tool: String,

    /// Use this build space instead of asking catkin
    pub build_space: Option<PathBuf>,

    /// Abort on a malformed workspace or a missing build space
    pub strict: bool,

    /// Options passed through to the linker
    pub link: LinkOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            tool: DEFAULT_TOOL.to_string(),
            build_space: None,
            strict: false,
            link: LinkOptions::default(),
        }
    }
}

/// Everything a run found and did.
#[derive(Debug, Clone)]
pub struct LinkReport {
    pub profile: Profile,
    pub build_space: PathBuf,
    pub packages: PackageSet,
    pub outcomes: Vec<LinkOutcome>,
}

impl LinkReport {
    pub fn linked_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_linked()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn planned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LinkOutcome::Planned { .. }))
            .count()
    }

    /// Packages left without a link for a benign reason.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    LinkOutcome::MissingMetadata { .. } | LinkOutcome::MissingSource { .. }
                )
            })
            .count()
    }
}

/// Run the whole pipeline against `ws`.
///
/// Only profile resolution errors are always fatal. A malformed workspace
/// or a missing build space is reported and tolerated unless
/// `opts.strict` is set. Per-package problems never abort the run.
pub fn catkin_link(ws: &CatkinWorkspace, opts: &RunOptions, shell: &Shell) -> Result<LinkReport> {
    if let Err(e) = ws.validate() {
        if opts.strict {
            return Err(e.into());
        }
        warn_catkin(shell, &e);
    }

    let profile = Profile::resolve(&ws.profiles_file())?;
    shell.status(Status::Profile, format!("using profile `{}`", profile));

    let build_space = resolve_build_space(ws, opts, shell)?;
    tracing::debug!("build space: {}", build_space.display());

    let src_dir = ws.src_dir();
    shell.verbose(Status::Scanning, src_dir.display());
    let packages = discover_packages(&src_dir);
    shell.status(
        Status::Found,
        format!(
            "{} catkin package{} in {}",
            packages.len(),
            if packages.len() == 1 { "" } else { "s" },
            src_dir.display()
        ),
    );

    let span = shell.span(Status::Linking, build_space.display());
    let outcomes = link_packages(packages.as_slice(), &build_space, &opts.link);
    for outcome in &outcomes {
        report_outcome(shell, outcome, &opts.link.metadata_file);
    }

    let report = LinkReport {
        profile,
        build_space,
        packages,
        outcomes,
    };

    let summary = if opts.link.dry_run {
        format!("{} to link", report.planned_count())
    } else {
        format!("{} linked", report.linked_count())
    };
    span.finish_with_message(format!(
        "{}, {} skipped, {} failed",
        summary,
        report.skipped_count(),
        report.failed_count()
    ));

    Ok(report)
}

/// Pick the build space: explicit override, then `catkin locate -b`, then
/// the workspace's `build/` directory.
fn resolve_build_space(
    ws: &CatkinWorkspace,
    opts: &RunOptions,
    shell: &Shell,
) -> Result<PathBuf> {
    if let Some(ref dir) = opts.build_space {
        return Ok(absolute_path(dir));
    }

    shell.verbose(Status::Locating, format!("`{} locate -b`", opts.tool));
    let failure = match locate_build_space(ws, &opts.tool) {
        Ok(Some(dir)) => return Ok(dir),
        Ok(None) => anyhow!("`{} locate -b` reported no build space", opts.tool),
        Err(e) => e,
    };

    if opts.strict {
        return Err(failure);
    }

    match failure.downcast_ref::<CatkinError>() {
        Some(e) => warn_catkin(shell, e),
        None => shell.warn(format!("{:#}", failure)),
    }

    let fallback = ws.build_dir();
    shell.warn(format!("falling back to {}", fallback.display()));
    Ok(fallback)
}

fn warn_catkin(shell: &Shell, err: &CatkinError) {
    if !shell.is_quiet() {
        diagnostic::emit(&err.to_diagnostic().as_warning(), shell.use_color());
    }
}

fn report_outcome(shell: &Shell, outcome: &LinkOutcome, metadata_file: &str) {
    match outcome {
        LinkOutcome::Linked {
            package,
            target,
            previous,
            ..
        } => match previous {
            Some(prev) if prev == target => {
                shell.verbose(Status::Linked, format!("{} (unchanged)", package));
            }
            Some(prev) => shell.status(
                Status::Updated,
                format!("{} (was {})", package, prev.display()),
            ),
            None => shell.status(Status::Linked, package),
        },
        LinkOutcome::Planned {
            package,
            link,
            target,
        } => {
            shell.verbose(Status::Planned, package);
            shell.print(format!("{} -> {}", link.display(), target.display()));
        }
        LinkOutcome::MissingMetadata { package, expected } => shell.status(
            Status::Skipped,
            format!("{}: no {} at {}", package, metadata_file, expected.display()),
        ),
        LinkOutcome::MissingSource {
            package,
            source_dir,
        } => {
            tracing::debug!(
                "skipping `{}`: {} does not exist",
                package,
                source_dir.display()
            );
        }
        LinkOutcome::Failed {
            package,
            link,
            error,
        } => shell.error(format!(
            "failed to link `{}` at {}: {}",
            package,
            link.display(),
            error
        )),
    }
}
