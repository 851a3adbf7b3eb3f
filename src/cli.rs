use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::preview::server::DEFAULT_PORT;

/// Top-level CLI entry point for the kaizen project bootstrapper.
#[derive(Parser, Debug)]
#[command(
    name = "kaizen",
    about = "Bootstrap a Kaizen front-end starter project",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install the starter project into a directory
    Install(InstallOpts),
    /// Serve a directory for local preview
    Serve(ServeOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Target directory (must exist)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Replace files that already exist in the target
    #[arg(short, long)]
    pub overwrite: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// TOML file overriding archive sources and the vendor tool
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip specific steps
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific steps
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `serve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ServeOpts {
    /// Directory to serve (must exist)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
