// ABOUTME: Entry point for the stackdrop CLI application.
// ABOUTME: Sets up logging, dispatches the command, and exits 1 on any failure.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use stackdrop::config::{self, Config};
use stackdrop::error::{Error, Result};
use std::env;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("stackdrop=debug,info")
        } else {
            EnvFilter::new("stackdrop=info,warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stdout().is_terminal())
        .init();

    if let Err(e) = run(cli).await {
        match &e {
            Error::Pipeline(failure) => tracing::error!(
                step = failure.step().number(),
                kind = ?failure.kind(),
                "Deployment failed at {}: {}",
                failure.step(),
                failure.deploy_error()
            ),
            other => tracing::error!("{other}"),
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;

    match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Init {
            stack,
            region,
            force,
        } => config::init_config(&cwd, stack.as_deref(), region.as_deref(), force),
        Commands::Deploy => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::deploy(config).await
        }
        Commands::Outputs => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::outputs(config).await
        }
    }
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match explicit {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound(path.to_path_buf())),
        // Relative paths are taken from the working directory
        Some(path) => Config::load(&cwd.join(path)),
        None => Config::discover_or_default(cwd),
    }
}
