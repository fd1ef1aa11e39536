//! Tracing subscriber setup.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SNIPPETGEN_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Logs go to stderr; stdout is reserved for generated code.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
