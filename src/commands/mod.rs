//! # CLI Command Implementations
//!
//! Each subcommand of the `device-metadata` tool lives in its own file with
//! an `Args` struct derived using `clap` and an `execute` function. Options
//! that locate the hudson inputs are shared through [`sources::SourceArgs`].

pub mod diff;
pub mod sources;
pub mod update;
