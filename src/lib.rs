//! # Device Metadata Library
//!
//! This library builds the per-device metadata for LineageOS devices from the
//! upstream `hudson` repository. It is used by the `device-metadata`
//! command-line tool, which writes the result to `device-metadata.json`.
//!
//! ## Quick Example
//!
//! ```
//! use device_metadata::config::DeviceFilter;
//! use device_metadata::pipeline::{reconcile, Inputs};
//!
//! let inputs = Inputs {
//!     build_targets: "bacon userdebug cm-14.1 24\n".to_string(),
//!     ..Default::default()
//! };
//! let filter = DeviceFilter::new(["bacon"], Vec::<&str>::new());
//!
//! let result = reconcile(&inputs, &filter).unwrap();
//! assert_eq!(result.metadata["bacon"].branch, "cm-14.1");
//! assert!(result.metadata["bacon"].deps.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! - **Filter (`config`)**: the supported/unsupported device lists from
//!   `supported_devices.toml`. Unsupported always wins.
//! - **Manifest (`manifest`)**: the `lineage-build-targets` parser.
//! - **Accumulator (`metadata`)**: a two-phase builder. Build targets seed
//!   entries; device records and dependency lists only update them.
//! - **Pipeline (`pipeline`)**: reads the inputs and runs seed, enrich, and
//!   dependency overlay in order.
//! - **Checkouts (`repository`, `git`)**: shallow clones of hudson, cached on
//!   disk.
//! - **Persistence (`output`)**: sorted, pretty-printed JSON.

pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod manifest;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod repository;
pub mod sources;

#[cfg(test)]
mod metadata_proptest;
