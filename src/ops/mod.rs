//! High-level operations.
//!
//! Each step of a run lives in its own module; [`catkin_link`] chains them.

pub mod catkin_link;
pub mod discover;
pub mod link;
pub mod locate;

pub use catkin_link::{catkin_link, LinkReport, RunOptions};
pub use discover::{classify_cmake_lists, discover_packages, CmakeKind};
pub use link::{link_package, link_packages, LinkOptions, LinkOutcome};
pub use locate::locate_build_space;
