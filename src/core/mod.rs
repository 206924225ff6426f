//! Core data structures.
//!
//! - The workspace root and its marker paths
//! - The active build profile
//! - Discovered packages
//! - Error types

pub mod errors;
pub mod package;
pub mod profile;
pub mod workspace;

pub use errors::CatkinError;
pub use package::{Package, PackageSet};
pub use profile::{Profile, ProfileSource, DEFAULT_PROFILE};
pub use workspace::{CatkinWorkspace, BUILD_DIR, MARKER_DIR, SRC_DIR};
