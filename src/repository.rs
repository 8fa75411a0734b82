//! # Hudson Checkout Management
//!
//! This module provides the `RepositoryManager`, which turns a repository URL
//! and ref into a local checkout directory that the pipeline can read from.
//!
//! Every checkout first asks the remote which commit the ref points at. The
//! cache is keyed by repository, ref, and that commit, so a branch that moved
//! upstream gets a new snapshot while an unchanged one is reused as-is.
//!
//! ## Design
//!
//! Git access goes through the **`GitOperations`** trait. The application uses
//! `DefaultGitOperations`, which shells out to the system `git`; tests inject a
//! mock that records calls and fabricates checkouts without touching the
//! network.

use crate::error::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Name of the cache directory under the platform cache dir.
const CACHE_DIR_NAME: &str = "device-metadata";

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Resolves a branch or tag on the remote to a commit hash.
    fn resolve_ref(&self, url: &str, ref_name: &str) -> Result<String>;

    /// Clones a repository at a specific Git reference (branch or tag) into
    /// `target_dir`, replacing anything already there.
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn resolve_ref(&self, url: &str, ref_name: &str) -> Result<String> {
        crate::git::resolve_ref(url, ref_name)
    }

    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, ref_name, target_dir)
    }
}

/// Default cache root: `<platform cache dir>/device-metadata`.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".device-metadata-cache"))
}

/// Resolves repositories to local checkout directories.
pub struct RepositoryManager {
    git_ops: Box<dyn GitOperations>,
    cache_root: PathBuf,
}

impl RepositoryManager {
    /// Creates a new `RepositoryManager` using the system `git` and the given
    /// cache root.
    pub fn new(cache_root: PathBuf) -> Self {
        Self::with_operations(Box::new(DefaultGitOperations), cache_root)
    }

    /// Creates a `RepositoryManager` with a custom `GitOperations`
    /// implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>, cache_root: PathBuf) -> Self {
        Self {
            git_ops,
            cache_root,
        }
    }

    /// Directory the snapshot of `url` at `ref_name` and `commit` lives in.
    pub fn cache_path(&self, url: &str, ref_name: &str, commit: &str) -> PathBuf {
        crate::git::url_to_cache_path(&self.cache_root, url, ref_name).join(commit)
    }

    /// Returns the checkout of the commit `ref_name` currently points at,
    /// cloning only if that commit is not cached yet.
    pub fn checkout(&self, url: &str, ref_name: &str) -> Result<PathBuf> {
        let commit = self.git_ops.resolve_ref(url, ref_name)?;
        let cache_path = self.cache_path(url, ref_name, &commit);

        if cache_path.is_dir() {
            debug!(
                "Using cached checkout of {} at {}",
                commit,
                cache_path.display()
            );
            return Ok(cache_path);
        }

        info!("Cloning {}@{} ({})", url, ref_name, commit);
        self.git_ops.clone_shallow(url, ref_name, &cache_path)?;
        Ok(cache_path)
    }

    /// Clones `url` at `ref_name` again, replacing any cached snapshot of the
    /// same commit.
    pub fn checkout_fresh(&self, url: &str, ref_name: &str) -> Result<PathBuf> {
        let commit = self.git_ops.resolve_ref(url, ref_name)?;
        let cache_path = self.cache_path(url, ref_name, &commit);

        info!("Cloning {}@{} ({}, bypassing cache)", url, ref_name, commit);
        self.git_ops.clone_shallow(url, ref_name, &cache_path)?;
        Ok(cache_path)
    }
}
