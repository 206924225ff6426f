//! catkin-link - compile_commands.json links for catkin_tools workspaces
//!
//! This crate finds the catkin packages of a workspace, asks catkin_tools
//! where their build space is, and links each package's generated
//! `compile_commands.json` into its source directory for editors and
//! static analyzers.

pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for catkin workspaces.
///
/// Only available when compiling unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{CatkinError, CatkinWorkspace, Package, PackageSet, Profile};
pub use crate::ops::{catkin_link, LinkReport, RunOptions};
