//! Per-device comparison of two metadata mappings.

use crate::metadata::DeviceMetadataMap;
use std::collections::BTreeSet;

/// How a single device differs between two mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeType {
    /// Device exists only in the new mapping
    Added,
    /// Device exists only in the old mapping
    Removed,
    /// Device exists in both but its metadata differs
    Modified,
}

/// A single change entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChange {
    pub device: String,
    pub change_type: ChangeType,
}

/// Compares `old` with `new`, returning one entry per differing device in
/// device order.
pub fn diff(old: &DeviceMetadataMap, new: &DeviceMetadataMap) -> Vec<DeviceChange> {
    let devices: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    devices
        .into_iter()
        .filter_map(|device| {
            let change_type = match (old.get(device), new.get(device)) {
                (None, Some(_)) => ChangeType::Added,
                (Some(_), None) => ChangeType::Removed,
                (Some(before), Some(after)) if before != after => ChangeType::Modified,
                _ => return None,
            };
            Some(DeviceChange {
                device: device.clone(),
                change_type,
            })
        })
        .collect()
}
