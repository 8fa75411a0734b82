//! Update command implementation
//!
//! The update command runs the full pipeline:
//! 1. Load the supported devices list
//! 2. Fetch (or reuse) the hudson checkout
//! 3. Seed from build targets, enrich from devices.json, overlay device_deps.json
//! 4. Write device-metadata.json
//!
//! Output is only written once every step has succeeded.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use device_metadata::output::{self, DEFAULT_OUTPUT_FILE};

use super::sources::SourceArgs;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// File to write the metadata to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Print the metadata to stdout instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the update command
pub fn execute(args: UpdateArgs) -> Result<ExitCode> {
    let start_time = Instant::now();

    let reconciled = args.sources.reconcile()?;
    let report = &reconciled.report;

    if args.dry_run {
        let json = output::to_json_string(&reconciled.metadata)?;
        std::io::stdout()
            .write_all(json.as_bytes())
            .context("Failed to write metadata to stdout")?;
        return Ok(ExitCode::SUCCESS);
    }

    output::save(&args.output, &reconciled.metadata)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if !args.quiet {
        println!(
            "✅ Updated {} devices in {:.2}s",
            report.devices,
            start_time.elapsed().as_secs_f64()
        );
        println!(
            "   {} build targets, {} enriched, {} with dependencies",
            report.targets, report.enriched, report.deps_applied
        );
        if !report.inconsistent.is_empty() {
            println!(
                "⚠️  Skipped dependencies for {} device(s) without a build target: {}",
                report.inconsistent.len(),
                report.inconsistent.join(", ")
            );
        }
        println!("   Written to: {}", args.output.display());
    }

    Ok(ExitCode::SUCCESS)
}
