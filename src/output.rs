//! # Metadata Persistence
//!
//! Writes the reconciled mapping as pretty-printed JSON. The output is meant
//! to be committed to version control, so it has to be byte-stable:
//!
//! - objects are emitted with keys in sorted order (device ids and record
//!   fields alike),
//! - two-space indentation,
//! - a single trailing newline.
//!
//! The file is only written after the whole pipeline has succeeded.

use crate::error::Result;
use crate::metadata::DeviceMetadataMap;
use log::debug;
use std::fs;
use std::path::Path;

/// Default file name of the generated metadata.
pub const DEFAULT_OUTPUT_FILE: &str = "device-metadata.json";

/// Serializes `metadata` to its canonical on-disk form.
pub fn to_json_string(metadata: &DeviceMetadataMap) -> Result<String> {
    // Going through `Value` sorts record fields as well as device ids.
    let value = serde_json::to_value(metadata)?;
    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    Ok(json)
}

/// Writes `metadata` to `path`, creating parent directories as needed.
pub fn save(path: &Path, metadata: &DeviceMetadataMap) -> Result<()> {
    let json = to_json_string(metadata)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, json)?;
    debug!("Wrote {} devices to {}", metadata.len(), path.display());
    Ok(())
}

/// Reads a previously saved mapping.
pub fn load(path: &Path) -> Result<DeviceMetadataMap> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
