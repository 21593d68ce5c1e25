use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The well-known location of the configuration, relative to the working directory.
pub const CONFIG_FILE: &str = "config.json";

/// The run configuration, loaded once and never mutated afterwards.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base directory for file discovery.
    pub folder: String,
    /// Glob fragment joined onto `folder`, e.g. `*.txt`.
    #[serde(rename = "fileFilter")]
    pub file_filter: String,
    /// The regular expression to search for.
    pub search: String,
    /// Replacement templates keyed by environment name.
    /// Templates may reference capture groups of `search` (`$1`, `${name}`).
    pub replacements: HashMap<String, String>,
}

/// A utility for loading the run configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a `Config` from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the JSON configuration file.
    pub fn load(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
