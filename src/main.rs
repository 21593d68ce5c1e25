//! The main entry point for the `envswap` command-line application.

use envswap::config::CONFIG_FILE;
use envswap::{cli, logging, replacer, OsFileSystem};
use std::io;
use std::path::Path;
use std::process;
use tracing::error;

fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();
    logging::init()?;

    // Per-file failures are already logged; only setup errors end up here.
    if let Err(e) = replacer::run(
        Path::new(CONFIG_FILE),
        &args.environment,
        &OsFileSystem,
        io::stdout(),
    ) {
        error!("{e}");
        process::exit(1);
    }

    Ok(())
}
