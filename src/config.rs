//! # Supported Devices Configuration
//!
//! This module defines the allow/deny list that gates which devices may appear
//! in the generated metadata. The list lives in a small TOML file next to the
//! generated output:
//!
//! ```toml
//! supported = ["angler", "bacon", "bullhead"]
//! unsupported = ["bacon"]
//! ```
//!
//! A device is eligible when it is listed in `supported` and not listed in
//! `unsupported`. An explicit deny always wins, so a device listed in both is
//! excluded.
//!
//! The filter is loaded once per run and handed to each pipeline stage by
//! reference.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default file name of the supported devices configuration.
pub const DEFAULT_CONFIG_FILE: &str = "supported_devices.toml";

/// The supported/unsupported device sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceFilter {
    /// Devices that may be included in the output.
    #[serde(default)]
    pub supported: BTreeSet<String>,
    /// Devices that are excluded even when listed as supported.
    #[serde(default)]
    pub unsupported: BTreeSet<String>,
}

impl DeviceFilter {
    /// Builds a filter from any iterables of device identifiers.
    pub fn new<S, U, T>(supported: S, unsupported: U) -> Self
    where
        S: IntoIterator<Item = T>,
        U: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
            unsupported: unsupported.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `device` is supported and not explicitly unsupported.
    pub fn is_eligible(&self, device: &str) -> bool {
        self.supported.contains(device) && !self.unsupported.contains(device)
    }

    /// Number of devices that pass the filter.
    pub fn eligible_count(&self) -> usize {
        self.supported.difference(&self.unsupported).count()
    }
}

/// Parse a `DeviceFilter` from TOML content
pub fn parse(toml_content: &str) -> Result<DeviceFilter> {
    toml::from_str(toml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
    })
}

/// Parse a `DeviceFilter` from a TOML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DeviceFilter> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| match e {
        Error::ConfigParse { message } => Error::ConfigParse {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}
