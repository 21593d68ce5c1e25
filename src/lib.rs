//! `envswap` rewrites files in place with a regex substitution whose
//! replacement depends on the selected environment.
//!
//! A run is a straight pipeline:
//!
//! - `config`: loads the JSON configuration.
//! - `environment`: picks the replacement template for the environment.
//! - `file_selector`: expands the folder/filter glob into paths.
//! - `replacer`: compiles the pattern once, then reads, substitutes and
//!   writes back each file, reporting every match.
//!
//! Setup failures are returned as [`Error`]; per-file failures are logged
//! and never stop the run.

pub mod cli;
pub mod config;
pub mod environment;
pub mod errors;
pub mod file_selector;
pub mod file_system;
pub mod logging;
pub mod replacer;
pub mod report;

// Re-export main types for easier access by library users.
pub use config::{Config, ConfigLoader};
pub use errors::{Error, FileError, Result};
pub use file_system::{FileSystem, OsFileSystem};
pub use replacer::{FileOutcome, Replacer, RunContext};
pub use report::Report;
