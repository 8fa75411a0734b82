//! # Hudson Source Files
//!
//! Locations and readers for the three input files inside a hudson checkout:
//!
//! - `lineage-build-targets`: the line-oriented build targets manifest
//!   (parsed by [`crate::manifest`]).
//! - `updater/devices.json`: an array of device records with model, OEM,
//!   display name, and recovery flag.
//! - `updater/device_deps.json`: a map from device to the devices its build
//!   depends on.
//!
//! Each reader checks that its file exists before reading it, so a moved or
//! renamed upstream file surfaces as [`Error::MissingInputFile`] instead of a
//! bare I/O error.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Upstream repository holding the build targets and updater data.
pub const DEFAULT_HUDSON_URL: &str = "https://github.com/LineageOS/hudson";

/// Ref checked out from the hudson repository.
pub const DEFAULT_HUDSON_REF: &str = "main";

/// Default relative path of the build targets manifest.
pub const DEFAULT_BUILD_TARGETS_PATH: &str = "lineage-build-targets";

/// Default relative path of the device list.
pub const DEFAULT_DEVICES_PATH: &str = "updater/devices.json";

/// Default relative path of the device dependency map.
pub const DEFAULT_DEVICE_DEPS_PATH: &str = "updater/device_deps.json";

/// One entry of `updater/devices.json`.
///
/// Only the fields used for enrichment are modelled; the upstream file carries
/// more (images, architecture, ...) and those are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device identifier
    pub model: String,
    /// Manufacturer as written upstream, e.g. `Google`
    pub oem: String,
    /// Marketing name, e.g. `Pixel 3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_recovery: Option<bool>,
}

/// One entry of `updater/devices.json` as loaded from disk.
///
/// Only `model` is checked on load. The other fields are checked by
/// [`RawDeviceRecord::parse`], which is only called for seeded devices, so a
/// broken record for a device that is not built never fails a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDeviceRecord {
    pub model: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawDeviceRecord {
    /// Deserializes the full record.
    pub fn parse(&self) -> Result<DeviceRecord> {
        let mut object = self.fields.clone();
        object.insert("model".to_string(), Value::String(self.model.clone()));
        serde_json::from_value(Value::Object(object)).map_err(|e| Error::InvalidDeviceRecord {
            model: self.model.clone(),
            message: e.to_string(),
        })
    }
}

/// Device identifier to the devices its build depends on, in upstream order.
pub type DeviceDeps = BTreeMap<String, Vec<String>>;

/// Relative locations of the input files inside a hudson checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub build_targets: PathBuf,
    pub devices: PathBuf,
    pub device_deps: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            build_targets: PathBuf::from(DEFAULT_BUILD_TARGETS_PATH),
            devices: PathBuf::from(DEFAULT_DEVICES_PATH),
            device_deps: PathBuf::from(DEFAULT_DEVICE_DEPS_PATH),
        }
    }
}

impl SourcePaths {
    /// Joins every path onto `root`.
    pub fn resolve(&self, root: &Path) -> SourcePaths {
        SourcePaths {
            build_targets: root.join(&self.build_targets),
            devices: root.join(&self.devices),
            device_deps: root.join(&self.device_deps),
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingInputFile {
            path: path.to_path_buf(),
        })
    }
}

fn read_text(path: &Path) -> Result<String> {
    ensure_exists(path)?;
    std::fs::read_to_string(path).map_err(|e| Error::InputParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| Error::InputParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads the raw build targets manifest.
pub fn read_build_targets(path: &Path) -> Result<String> {
    read_text(path)
}

/// Reads the device list. Records are only checked for a `model`.
pub fn read_devices(path: &Path) -> Result<Vec<RawDeviceRecord>> {
    read_json(path)
}

/// Reads and deserializes the device dependency map.
pub fn read_device_deps(path: &Path) -> Result<DeviceDeps> {
    read_json(path)
}
