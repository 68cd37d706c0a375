//! Lumen CLI - checks the content layer of the Lumen docs site.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod watcher;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Validate and inspect the Lumen docs content collection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a docs project in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate front-matter of every page in the collection
    Check {
        /// Re-check whenever a page changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Show how pages are grouped into sidebar sections
    Sidebar {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print navigation, sidebar sections and site metadata as JSON
    Config {
        /// Only print one part
        #[arg(value_enum)]
        part: Option<commands::config::Part>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(Path::new("."), yes).await?;
        }
        Commands::Check { watch } => {
            commands::check::run(&cli.config, watch).await?;
        }
        Commands::Sidebar { json } => {
            commands::sidebar::run(&cli.config, json).await?;
        }
        Commands::Config { part } => {
            commands::config::run(part).await?;
        }
    }

    Ok(())
}
