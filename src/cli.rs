//! CLI argument parsing and command dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::commands;

/// Device Metadata - Build LineageOS device metadata from hudson
#[derive(Parser, Debug)]
#[command(name = "device-metadata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch hudson and write device-metadata.json
    Update(commands::update::UpdateArgs),

    /// Show how device-metadata.json would change without writing it
    Diff(commands::diff::DiffArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level)?;

        match self.command {
            Commands::Update(args) => commands::update::execute(args),
            Commands::Diff(args) => commands::diff::execute(args),
        }
    }
}

/// Logs go to stderr so that `update --dry-run` output on stdout stays clean.
fn init_logging(level: &str) -> Result<()> {
    let filter: log::LevelFilter = level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", level))?;

    env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init()
        .context("Failed to initialize logging")
}
