// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Running without a subcommand performs the full deployment.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stackdrop")]
#[command(about = "Build, deploy and publish a SAM serverless application")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: stackdrop.yml in the current directory, else built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the layer, deploy the stack and publish the website (default)
    Deploy,

    /// Print the deployed stack's outputs as JSON
    Outputs,

    /// Initialize a new stackdrop.yml configuration file
    Init {
        /// Stack name to write into the configuration
        #[arg(long)]
        stack: Option<String>,

        /// Region to write into the configuration
        #[arg(long)]
        region: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}
