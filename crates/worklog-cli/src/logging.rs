use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::Cli;

/// Level used when neither the command line nor RUST_LOG chooses one
const DEFAULT_LEVEL: &str = "warn";

/// Install the stderr subscriber; call once, before any adapter runs
pub fn init(cli: &Cli) {
    let filter = match cli.effective_log_level() {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
