//! catkin-link CLI - link compile_commands.json files into catkin packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ::catkin_link::ops::{self, LinkOptions, RunOptions};
use ::catkin_link::util::config::{global_config_path, load_config};
use ::catkin_link::util::diagnostic;
use ::catkin_link::util::Shell;
use ::catkin_link::{CatkinError, CatkinWorkspace};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    if let Err(e) = run(cli, &shell) {
        match e.downcast_ref::<CatkinError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), shell.use_color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("catkin_link=debug")
    } else if cli.quiet {
        EnvFilter::new("catkin_link=error")
    } else {
        EnvFilter::new("catkin_link=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ws = CatkinWorkspace::new(&cli.ws_root);

    // Command-line flags override the config files
    let config = load_config(global_config_path().as_deref(), &ws.config_path());
    let opts = RunOptions {
        tool: cli.tool.unwrap_or_else(|| config.tool().to_string()),
        build_space: cli.build_space,
        strict: cli.strict || config.strict(),
        link: LinkOptions {
            metadata_file: config.metadata_file().to_string(),
            dry_run: cli.dry_run,
            jobs: cli.jobs.or(config.jobs),
        },
    };

    ops::catkin_link(&ws, &opts, shell)?;
    Ok(())
}
