//! # Diff Command Implementation
//!
//! This module implements the `diff` subcommand, which shows how the
//! committed `device-metadata.json` would change if `update` ran now.
//!
//! - **Change Categories**: devices that would be added, modified, or removed
//! - **Exit Codes**: 0 if nothing would change, 1 if changes exist
//!
//! The command is read-only. A missing metadata file is treated as empty, so
//! every device shows up as added.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use device_metadata::diff::{diff, ChangeType};
use device_metadata::metadata::DeviceMetadataMap;
use device_metadata::output::{self, DEFAULT_OUTPUT_FILE};

use super::sources::SourceArgs;

/// Show differences between the current metadata file and a fresh update
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Existing metadata file to compare against
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Show only a summary without listing individual devices.
    #[arg(long)]
    pub summary: bool,
}

/// Execute the `diff` command.
///
/// Returns exit code 0 if there are no changes and 1 if changes exist.
pub fn execute(args: DiffArgs) -> Result<ExitCode> {
    let reconciled = args.sources.reconcile()?;

    let current = if args.output.exists() {
        output::load(&args.output)
            .with_context(|| format!("Failed to read {}", args.output.display()))?
    } else {
        DeviceMetadataMap::new()
    };

    let changes = diff(&current, &reconciled.metadata);
    if changes.is_empty() {
        println!("No changes detected.");
        return Ok(ExitCode::SUCCESS);
    }

    let count = |kind: ChangeType| changes.iter().filter(|c| c.change_type == kind).count();
    let added = count(ChangeType::Added);
    let modified = count(ChangeType::Modified);
    let removed = count(ChangeType::Removed);

    if !args.summary {
        for change in &changes {
            let marker = match change.change_type {
                ChangeType::Added => '+',
                ChangeType::Modified => '~',
                ChangeType::Removed => '-',
            };
            println!("  {} {}", marker, change.device);
        }
        println!();
    }

    println!(
        "Summary: {} added, {} modified, {} removed",
        added, modified, removed
    );

    Ok(ExitCode::FAILURE)
}
