//! # Error Handling
//!
//! This module defines the centralized error type for the `device-metadata`
//! library. It uses `thiserror` to build a single `Error` enum that covers
//! every fatal failure mode of a metadata update, with messages that name
//! the offending file, line, or repository.
//!
//! ## Key Components
//!
//! - **`Error`**: All fatal errors. Any of them aborts the run before output
//!   is written.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Dependency inconsistencies (a dependency entry for a supported device that
//! the build targets never listed) are not errors. They are logged as
//! warnings and recorded in the run report.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for device-metadata operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while cloning the hudson repository.
    ///
    /// Includes the repository URL, ref (branch/tag), error message, and an
    /// optional hint for resolution.
    #[error("Git clone error for {url}@{r#ref}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// The requested branch or tag does not exist in the remote repository.
    #[error("Ref '{r#ref}' not found in {url}")]
    RefNotFound { url: String, r#ref: String },

    /// A `git` invocation could not be run or exited with an error.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// A build-targets line did not have exactly four fields.
    #[error("Build targets parse error at line {line_number}: expected 4 fields (device variant branch period), found {found} in '{line}'")]
    ManifestParse {
        line_number: usize,
        line: String,
        found: usize,
    },

    /// One of the expected input files is absent.
    #[error("Missing input file: {}", path.display())]
    MissingInputFile { path: PathBuf },

    /// A structured input file did not match its expected shape.
    #[error("Failed to parse {}: {message}", path.display())]
    InputParse { path: PathBuf, message: String },

    /// A `devices.json` record for a seeded device is malformed.
    #[error("Invalid device record for '{model}': {message}")]
    InvalidDeviceRecord { model: String, message: String },

    /// The supported devices configuration is malformed.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
