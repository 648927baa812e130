//! acton-breadcrumbs CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use acton_breadcrumbs::observability;
use acton_breadcrumbs_cli_lib::{CheckCommand, ListCommand, PublishCommand, PublishTarget};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "acton-breadcrumbs")]
#[command(version)]
#[command(about = "CLI tool for acton-breadcrumbs", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy config, views or starter definitions into the project
    Publish {
        /// What to publish
        #[arg(value_enum)]
        target: PublishTarget,
        /// Project directory
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Validate breadcrumb configuration and definition files
    Check {
        /// Path to config.toml
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// List registered breadcrumbs and views
    List {
        /// Path to config.toml
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        observability::default_filter()
    } else {
        EnvFilter::new("warn")
    };
    observability::init_with_filter(filter)?;

    match cli.command {
        Commands::Publish {
            target,
            root,
            force,
        } => {
            PublishCommand::new(target, root, force).execute()?;
        }
        Commands::Check { config } => {
            CheckCommand::new(config).execute()?;
        }
        Commands::List { config } => {
            ListCommand::new(config).execute()?;
        }
    }

    Ok(())
}
