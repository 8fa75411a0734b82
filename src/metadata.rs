//! # Device Metadata Accumulator
//!
//! The reconciled metadata is built in two phases:
//!
//! 1. **Seeding** with [`MetadataBuilder`]: every build target that passes the
//!    [`DeviceFilter`] creates (or silently replaces) an entry holding its
//!    variant and branch. This is the only place entries are created.
//! 2. **Updating** with [`Metadata`]: enrichment and the dependency overlay
//!    modify existing entries only. Records for unknown devices are rejected
//!    and counted, never inserted.
//!
//! [`Metadata::into_map`] hands back the final, ordered mapping for
//! persistence.

use crate::config::DeviceFilter;
use crate::manifest::BuildTarget;
use crate::sources::{DeviceDeps, DeviceRecord};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reconciled metadata for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMetadata {
    /// Build variant from the build targets manifest
    pub variant: String,
    /// Source branch from the build targets manifest
    pub branch: String,
    /// Devices this device's build depends on
    #[serde(default)]
    pub deps: Vec<String>,
    /// Lower-cased OEM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Marketing name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the device ships Lineage Recovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_recovery: Option<bool>,
}

impl DeviceMetadata {
    fn seeded(target: &BuildTarget) -> Self {
        Self {
            variant: target.variant.clone(),
            branch: target.branch.clone(),
            deps: Vec::new(),
            vendor: None,
            name: None,
            lineage_recovery: None,
        }
    }
}

/// The final device identifier to metadata mapping, in key order.
pub type DeviceMetadataMap = BTreeMap<String, DeviceMetadata>;

/// Creates metadata entries from build targets.
#[derive(Debug)]
pub struct MetadataBuilder<'a> {
    filter: &'a DeviceFilter,
    entries: DeviceMetadataMap,
}

impl<'a> MetadataBuilder<'a> {
    pub fn new(filter: &'a DeviceFilter) -> Self {
        Self {
            filter,
            entries: DeviceMetadataMap::new(),
        }
    }

    /// Seeds one build target. Returns `false` when the filter rejects it.
    ///
    /// A device seen again replaces its earlier entry without a warning.
    pub fn seed(&mut self, target: &BuildTarget) -> bool {
        if !self.filter.is_eligible(&target.device) {
            return false;
        }

        if let Some(previous) = self
            .entries
            .insert(target.device.clone(), DeviceMetadata::seeded(target))
        {
            debug!(
                "Build target '{}' listed again: {} {} replaces {} {}",
                target.device, target.variant, target.branch, previous.variant, previous.branch
            );
        }
        true
    }

    /// Seeds every target in order, returning how many passed the filter.
    pub fn seed_all<'t, I>(&mut self, targets: I) -> usize
    where
        I: IntoIterator<Item = &'t BuildTarget>,
    {
        targets
            .into_iter()
            .filter(|target| self.seed(target))
            .count()
    }

    /// Ends the seeding phase.
    pub fn build(self) -> Metadata {
        Metadata {
            entries: self.entries,
        }
    }
}

/// Result of [`Metadata::enrich`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichOutcome {
    /// Records merged into an existing entry
    pub enriched: usize,
    /// Records for devices that were never seeded
    pub skipped: usize,
}

/// Result of [`Metadata::overlay_deps`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayOutcome {
    /// Entries whose dependency list was replaced
    pub applied: usize,
    /// Entries dropped by the device filter
    pub filtered: usize,
    /// Supported devices with dependencies but no seeded entry, in device order
    pub inconsistent: Vec<String>,
}

/// Seeded metadata that only accepts updates to existing devices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: DeviceMetadataMap,
}

impl Metadata {
    /// Merges OEM, name, and recovery flag from matching device records.
    ///
    /// Later records for the same device overwrite earlier ones.
    pub fn enrich(&mut self, records: &[DeviceRecord]) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();

        for record in records {
            let Some(entry) = self.entries.get_mut(&record.model) else {
                outcome.skipped += 1;
                continue;
            };

            entry.vendor = Some(record.oem.to_lowercase());
            entry.name = record.name.clone();
            entry.lineage_recovery = Some(record.lineage_recovery.unwrap_or(false));
            outcome.enriched += 1;
        }

        outcome
    }

    /// Replaces dependency lists of seeded devices.
    ///
    /// Devices rejected by `filter` are skipped silently. Supported devices
    /// without an entry are logged as a warning and skipped.
    pub fn overlay_deps(&mut self, deps: &DeviceDeps, filter: &DeviceFilter) -> OverlayOutcome {
        let mut outcome = OverlayOutcome::default();

        for (device, device_deps) in deps {
            if !filter.is_eligible(device) {
                outcome.filtered += 1;
                continue;
            }

            match self.entries.get_mut(device) {
                Some(entry) => {
                    entry.deps = device_deps.clone();
                    outcome.applied += 1;
                }
                None => {
                    warn!(
                        "{} has dependencies but is not a supported build target; skipping",
                        device
                    );
                    outcome.inconsistent.push(device.clone());
                }
            }
        }

        outcome
    }

    pub fn get(&self, device: &str) -> Option<&DeviceMetadata> {
        self.entries.get(device)
    }

    pub fn contains(&self, device: &str) -> bool {
        self.entries.contains_key(device)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finishes the update phase.
    pub fn into_map(self) -> DeviceMetadataMap {
        self.entries
    }
}
