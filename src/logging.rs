//! Diagnostic logging on stderr
//!
//! stdout carries only the resolved number, so every log line goes to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "RESOLVE_PR_LOG";

/// Filter directive for the given verbosity flags
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RESOLVE_PR_LOG` takes precedence over `-v`/`-q` when set.
pub fn init(verbose: u8, quiet: bool, ansi: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(verbose >= 2)
        .without_time();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
