//! Active build profile resolution.
//!
//! catkin_tools records the active profile in
//! `.catkin_tools/profiles/profiles.yaml` as a line `active: <name>`.
//! Workspaces that never switched profiles have no such file, only a
//! `profiles/default/` directory.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::CatkinError;

/// Name of the profile used when no profile file exists.
pub const DEFAULT_PROFILE: &str = "default";

static ACTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^active:[ \t]*(\S+)").expect("valid regex"));

/// Where the profile name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    /// The `active:` key of `profiles.yaml`.
    ProfilesFile,
    /// The `default/` profile directory fallback.
    DefaultDir,
}

/// The active build profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    source: ProfileSource,
}

impl Profile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> ProfileSource {
        self.source
    }

    /// Resolve the active profile from a `profiles.yaml` path.
    ///
    /// Falls back to `default` when the file is missing but the sibling
    /// `default/` directory exists.
    pub fn resolve(profiles_file: &Path) -> Result<Profile, CatkinError> {
        let profiles_dir = profiles_file.parent().unwrap_or(Path::new("."));

        if !profiles_file.exists() {
            if profiles_dir.join(DEFAULT_PROFILE).is_dir() {
                tracing::debug!("no profiles file, using the `default` profile");
                return Ok(Profile {
                    name: DEFAULT_PROFILE.to_string(),
                    source: ProfileSource::DefaultDir,
                });
            }
            return Err(CatkinError::NoProfile {
                profiles_dir: profiles_dir.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(profiles_file)
            .map_err(|e| CatkinError::io(profiles_file, e))?;

        let name = parse_active(&contents).ok_or_else(|| CatkinError::NoActiveProfile {
            path: profiles_file.to_path_buf(),
        })?;

        tracing::debug!("active profile `{}` from {}", name, profiles_file.display());
        Ok(Profile {
            name,
            source: ProfileSource::ProfilesFile,
        })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Extract the value of the line-anchored `active:` key.
fn parse_active(contents: &str) -> Option<String> {
    let caps = ACTIVE_RE.captures(contents)?;
    let value = caps[1].trim_matches(|c| c == '"' || c == '\'');
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
