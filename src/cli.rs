use crate::environment::DEFAULT_ENVIRONMENT;
use clap::Parser;

/// Environment-aware regex search and replace.
///
/// Reads `config.json` from the working directory, picks the replacement
/// configured for the selected environment, and rewrites every file matched
/// by `folder`/`fileFilter`, substituting each match of `search`.
///
/// Config file format (config.json):
///   {
///     "folder": "data",
///     "fileFilter": "*.txt",
///     "search": "foo(\\d+)",
///     "replacements": {"dev": "bar$1", "production": "baz$1"}
///   }
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Environment to select the replacement string (e.g., dev, staging, production)
    #[arg(short, long, default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
