//! # Build Targets Manifest
//!
//! Parser for hudson's `lineage-build-targets` file. Every meaningful line
//! names one build target as four whitespace-separated fields:
//!
//! ```text
//! # device  variant    branch      period
//! angler    userdebug  lineage-21  W
//! bacon     userdebug  cm-14.1     24
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Any other line with a
//! field count other than four is a hard error, so a corrupted manifest never
//! yields a partial device list.

use crate::error::{Error, Result};

/// Comment marker for manifest lines.
const COMMENT_MARKER: char = '#';

/// A single parsed line of the build targets manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Device identifier (codename)
    pub device: String,
    /// Build variant, e.g. `userdebug`
    pub variant: String,
    /// Source branch the device is built from
    pub branch: String,
    /// Build cadence. Parsed but not carried into the output.
    pub update_period: String,
}

impl BuildTarget {
    /// Parses one non-comment line. `line_number` is 1-based and only used for
    /// error reporting.
    fn parse_line(line: &str, line_number: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [device, variant, branch, update_period] => Ok(Self {
                device: (*device).to_string(),
                variant: (*variant).to_string(),
                branch: (*branch).to_string(),
                update_period: (*update_period).to_string(),
            }),
            _ => Err(Error::ManifestParse {
                line_number,
                line: line.to_string(),
                found: fields.len(),
            }),
        }
    }
}

/// Parses the full manifest into build targets, in file order.
///
/// Repeated devices are returned as-is; deduplication is left to the seeding
/// stage, where a later line overwrites an earlier one.
pub fn parse(content: &str) -> Result<Vec<BuildTarget>> {
    let mut targets = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        targets.push(BuildTarget::parse_line(line, index + 1)?);
    }

    Ok(targets)
}
