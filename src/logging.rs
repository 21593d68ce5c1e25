use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global diagnostic logger.
///
/// Diagnostics go to stderr at `INFO` and above so stdout carries only the
/// progress report. The level is fixed; nothing is read from the environment.
pub fn init() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
