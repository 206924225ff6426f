//! CLI definitions using clap.

use std::path::PathBuf;

use catkin_link::util::shell::ColorChoice;
use clap::Parser;

/// Link catkin_tools compile_commands.json files into package source directories
#[derive(Parser)]
#[command(name = "catkin-link")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The workspace root
    pub ws_root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// catkin executable used to locate the build space
    #[arg(long, value_name = "PATH", env = "CATKIN_LINK_TOOL")]
    pub tool: Option<String>,

    /// Use this build space instead of running `catkin locate -b`
    #[arg(long, value_name = "DIR")]
    pub build_space: Option<PathBuf>,

    /// Fail if the workspace is malformed or the build space cannot be found
    #[arg(long)]
    pub strict: bool,

    /// Print the links that would be created without creating them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Number of threads used for linking
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "catkin-link",
            "/ws",
            "--tool",
            "/opt/catkin",
            "--color",
            "never",
            "-n",
            "-j",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.ws_root, PathBuf::from("/ws"));
        assert_eq!(cli.tool.as_deref(), Some("/opt/catkin"));
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.dry_run);
        assert_eq!(cli.jobs, Some(4));
    }

    #[test]
    fn test_workspace_root_required() {
        assert!(Cli::try_parse_from(["catkin-link"]).is_err());
    }
}
