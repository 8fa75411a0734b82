//! Options shared by every command that reads hudson

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use device_metadata::config::{self, DEFAULT_CONFIG_FILE};
use device_metadata::pipeline::{self, Reconciled};
use device_metadata::repository::{default_cache_root, RepositoryManager};
use device_metadata::sources::{
    SourcePaths, DEFAULT_BUILD_TARGETS_PATH, DEFAULT_DEVICES_PATH, DEFAULT_DEVICE_DEPS_PATH,
    DEFAULT_HUDSON_REF, DEFAULT_HUDSON_URL,
};

/// Where the hudson inputs and the supported devices list come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// URL of the hudson repository
    #[arg(long, value_name = "URL", default_value = DEFAULT_HUDSON_URL)]
    pub hudson_url: String,

    /// Branch or tag of the hudson repository to check out
    #[arg(long = "ref", value_name = "REF", default_value = DEFAULT_HUDSON_REF)]
    pub git_ref: String,

    /// Read hudson from an existing local checkout instead of fetching it
    #[arg(long, value_name = "DIR", conflicts_with_all = ["hudson_url", "git_ref", "no_cache"])]
    pub hudson_path: Option<PathBuf>,

    /// Build targets manifest, relative to the hudson checkout
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BUILD_TARGETS_PATH)]
    pub build_targets: PathBuf,

    /// Device list, relative to the hudson checkout
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DEVICES_PATH)]
    pub devices: PathBuf,

    /// Device dependency map, relative to the hudson checkout
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DEVICE_DEPS_PATH)]
    pub device_deps: PathBuf,

    /// Supported/unsupported device lists
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub supported_devices: PathBuf,

    /// The root directory for the checkout cache.
    ///
    /// Defaults to the system cache directory (`~/.cache/device-metadata` on
    /// Linux, `~/Library/Caches/device-metadata` on macOS).
    #[arg(long, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Bypass the cache and clone hudson again
    #[arg(long)]
    pub no_cache: bool,
}

impl SourceArgs {
    fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            build_targets: self.build_targets.clone(),
            devices: self.devices.clone(),
            device_deps: self.device_deps.clone(),
        }
    }

    /// Resolves the hudson checkout directory, fetching it when needed.
    fn checkout(&self) -> Result<PathBuf> {
        if let Some(path) = &self.hudson_path {
            return Ok(path.clone());
        }

        let cache_root = self.cache_root.clone().unwrap_or_else(default_cache_root);
        let manager = RepositoryManager::new(cache_root);

        let checkout = if self.no_cache {
            manager.checkout_fresh(&self.hudson_url, &self.git_ref)
        } else {
            manager.checkout(&self.hudson_url, &self.git_ref)
        };
        checkout.with_context(|| format!("Failed to fetch {}", self.hudson_url))
    }

    /// Loads the device filter, fetches hudson, and reconciles the inputs.
    pub fn reconcile(&self) -> Result<Reconciled> {
        let filter = config::from_file(&self.supported_devices).with_context(|| {
            format!(
                "Failed to load supported devices from {}",
                self.supported_devices.display()
            )
        })?;

        let root = self.checkout()?;
        let reconciled = pipeline::run(&root, &self.source_paths(), &filter)
            .with_context(|| format!("Failed to build device metadata from {}", root.display()))?;
        Ok(reconciled)
    }
}
