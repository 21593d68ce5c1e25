use crate::config::Config;
use crate::errors::{Error, Result};

/// The environment used when none is given on the command line.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Picks the replacement template configured for `environment`.
///
/// The lookup is an exact, case-sensitive key match. There is no fallback:
/// an unknown environment is an error naming it and the known keys.
pub fn resolve_replacement<'a>(config: &'a Config, environment: &str) -> Result<&'a str> {
    match config.replacements.get(environment) {
        Some(template) => Ok(template.as_str()),
        None => {
            let mut available: Vec<String> = config.replacements.keys().cloned().collect();
            available.sort();
            Err(Error::Environment {
                name: environment.to_string(),
                available,
            })
        }
    }
}
