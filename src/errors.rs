use std::path::PathBuf;
use thiserror::Error;

/// The fatal error type for `envswap`.
///
/// Every variant stops the run before any target file is touched. The
/// top-level driver decides how to report it and which exit code to use.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Error reading config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON of the expected shape.
    #[error("Error parsing config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The requested environment has no entry in `replacements`.
    #[error("Invalid environment: {name} (available: {})", .available.join(", "))]
    Environment {
        name: String,
        available: Vec<String>,
    },

    /// The joined folder/filter pattern is not valid glob syntax.
    #[error("Error finding files: {0}")]
    Glob(#[from] glob::PatternError),

    /// The search pattern failed to compile.
    #[error("Error compiling regex: {0}")]
    Regex(#[from] regex::Error),

    /// Writing the progress report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A recoverable failure tied to one target file.
///
/// These are logged and the run moves on to the next file.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("error reading file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error writing file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A convenient type alias for `Result<T, envswap::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
