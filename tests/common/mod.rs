//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture that lays out a fake hudson checkout and a
//! supported devices list in a temporary directory, plus a few canned inputs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_defaults();
//!     fixture.update().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::inputs;
    pub use super::TestFixture;
}

/// Canned hudson inputs.
#[allow(dead_code)]
pub mod inputs {
    /// Build targets for three devices, with comments and blank lines.
    pub const TARGETS: &str = r#"# LineageOS build targets
# device variant branch period

angler userdebug lineage-21 W
bacon userdebug cm-14.1 24
bullhead userdebug lineage-21 M
"#;

    /// Device records, including one for a device without a build target.
    pub const DEVICES: &str = r#"[
  {"model": "angler", "oem": "Huawei", "name": "Nexus 6P", "arch": "arm64"},
  {"model": "bullhead", "oem": "LGE", "name": "Nexus 5X", "lineage_recovery": true},
  {"model": "sargo", "oem": "Google", "name": "Pixel 3a", "lineage_recovery": true}
]"#;

    /// Dependency lists, including an unsupported and an unlisted device.
    pub const DEVICE_DEPS: &str = r#"{
  "angler": ["android_device_huawei_angler", "android_kernel_huawei_angler"],
  "bacon": ["android_device_oneplus_bacon"],
  "walleye": ["android_device_google_wahoo"]
}"#;

    /// Supports all fixture devices except bacon.
    pub const SUPPORTED: &str = r#"supported = ["angler", "bacon", "bullhead", "sargo", "walleye"]
unsupported = ["bacon"]
"#;

    /// Expected `device-metadata.json` for the inputs above.
    pub const EXPECTED_OUTPUT: &str = r#"{
  "angler": {
    "branch": "lineage-21",
    "deps": [
      "android_device_huawei_angler",
      "android_kernel_huawei_angler"
    ],
    "lineage_recovery": false,
    "name": "Nexus 6P",
    "variant": "userdebug",
    "vendor": "huawei"
  },
  "bullhead": {
    "branch": "lineage-21",
    "deps": [],
    "lineage_recovery": true,
    "name": "Nexus 5X",
    "variant": "userdebug",
    "vendor": "lge"
  }
}
"#;
}

/// A test fixture that provides a temporary directory with a hudson checkout
/// under `hudson/` and `supported_devices.toml` at the top level.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the three hudson inputs at their default locations.
    pub fn with_hudson(self, targets: &str, devices: &str, device_deps: &str) -> Self {
        self.with_file("hudson/lineage-build-targets", targets)
            .with_file("hudson/updater/devices.json", devices)
            .with_file("hudson/updater/device_deps.json", device_deps)
    }

    /// Write the canned inputs and supported devices list.
    pub fn with_defaults(self) -> Self {
        self.with_hudson(inputs::TARGETS, inputs::DEVICES, inputs::DEVICE_DEPS)
            .with_supported(inputs::SUPPORTED)
    }

    /// Write `supported_devices.toml`.
    pub fn with_supported(self, content: &str) -> Self {
        self.with_file("supported_devices.toml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the fake hudson checkout.
    pub fn hudson_path(&self) -> PathBuf {
        self.temp_dir.path().join("hudson")
    }

    /// Get the path of the generated metadata file.
    pub fn output_path(&self) -> PathBuf {
        self.temp_dir.path().join("device-metadata.json")
    }

    /// Read the generated metadata file.
    pub fn read_output(&self) -> String {
        std::fs::read_to_string(self.output_path()).expect("Failed to read output")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("device-metadata");
        cmd.current_dir(self.path());
        cmd
    }

    /// `device-metadata <subcommand> --hudson-path <fixture>/hudson`.
    pub fn command_with_hudson(&self, subcommand: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg(subcommand).arg("--hudson-path").arg(self.hudson_path());
        cmd
    }

    /// `device-metadata update` against the fixture's hudson checkout.
    pub fn update(&self) -> assert_cmd::Command {
        self.command_with_hudson("update")
    }

    /// `device-metadata diff` against the fixture's hudson checkout.
    pub fn diff(&self) -> assert_cmd::Command {
        self.command_with_hudson("diff")
    }
}
