//! # Reconcile Pipeline
//!
//! Runs the three merge stages over one accumulator:
//!
//! 1. **Seed** from the build targets manifest, filtered by [`DeviceFilter`].
//! 2. **Enrich** seeded devices from `devices.json`.
//! 3. **Overlay** dependency lists from `device_deps.json`.
//!
//! All inputs are read up front by [`Inputs::load`], so a missing or malformed
//! file aborts the run before any merging happens. A malformed manifest line
//! aborts during stage 1. Either way nothing reaches persistence.

use crate::config::DeviceFilter;
use crate::error::Result;
use crate::manifest;
use crate::metadata::{DeviceMetadataMap, MetadataBuilder};
use crate::sources::{self, DeviceDeps, RawDeviceRecord, SourcePaths};
use log::{debug, info};
use std::path::Path;

/// The raw contents of the three hudson inputs.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    /// Unparsed build targets manifest
    pub build_targets: String,
    /// Device records, checked in full only once their device is seeded
    pub devices: Vec<RawDeviceRecord>,
    pub device_deps: DeviceDeps,
}

impl Inputs {
    /// Reads all inputs from a hudson checkout at `root`.
    pub fn load(root: &Path, paths: &SourcePaths) -> Result<Self> {
        let resolved = paths.resolve(root);
        debug!("Reading hudson inputs from {}", root.display());

        Ok(Self {
            build_targets: sources::read_build_targets(&resolved.build_targets)?,
            devices: sources::read_devices(&resolved.devices)?,
            device_deps: sources::read_device_deps(&resolved.device_deps)?,
        })
    }
}

/// Counters describing one reconcile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Build target lines parsed from the manifest
    pub targets: usize,
    /// Devices in the output
    pub devices: usize,
    /// Device records merged into the output
    pub enriched: usize,
    /// Dependency lists applied
    pub deps_applied: usize,
    /// Supported devices with dependencies but no build target
    pub inconsistent: Vec<String>,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub metadata: DeviceMetadataMap,
    pub report: RunReport,
}

/// Runs seed, enrich, and overlay over `inputs`.
pub fn reconcile(inputs: &Inputs, filter: &DeviceFilter) -> Result<Reconciled> {
    let targets = manifest::parse(&inputs.build_targets)?;

    let mut builder = MetadataBuilder::new(filter);
    let seeded = builder.seed_all(&targets);
    let mut metadata = builder.build();
    debug!(
        "Seeded {} devices from {} build targets ({} matched the filter, {} devices eligible)",
        metadata.len(),
        targets.len(),
        seeded,
        filter.eligible_count()
    );

    let mut records = Vec::new();
    let mut unseeded = 0;
    for raw in &inputs.devices {
        if metadata.contains(&raw.model) {
            records.push(raw.parse()?);
        } else {
            unseeded += 1;
        }
    }

    let enrich = metadata.enrich(&records);
    debug!(
        "Enriched {} devices, ignored {} device records",
        enrich.enriched,
        unseeded + enrich.skipped
    );

    let overlay = metadata.overlay_deps(&inputs.device_deps, filter);
    debug!(
        "Applied {} dependency lists, {} filtered, {} inconsistent",
        overlay.applied,
        overlay.filtered,
        overlay.inconsistent.len()
    );

    let report = RunReport {
        targets: targets.len(),
        devices: metadata.len(),
        enriched: enrich.enriched,
        deps_applied: overlay.applied,
        inconsistent: overlay.inconsistent,
    };

    Ok(Reconciled {
        metadata: metadata.into_map(),
        report,
    })
}

/// Loads inputs from `root` and reconciles them.
pub fn run(root: &Path, paths: &SourcePaths, filter: &DeviceFilter) -> Result<Reconciled> {
    let inputs = Inputs::load(root, paths)?;
    let reconciled = reconcile(&inputs, filter)?;
    info!(
        "Reconciled {} devices from {} build targets",
        reconciled.report.devices, reconciled.report.targets
    );
    Ok(reconciled)
}
