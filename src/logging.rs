//! Tracing setup for the command-line tool.
//!
//! Diagnostics are controlled by `TYPEGEN_LOG` (falling back to `RUST_LOG`),
//! using the usual filter syntax:
//!
//! ```bash
//! TYPEGEN_LOG=debug aura-typegen all
//! TYPEGEN_LOG="aura_typegen::typegen::helper=debug" aura-typegen helper
//! ```
//!
//! Without either variable only warnings are shown, or debug output when
//! `--verbose` is passed. Everything is written to stderr.

use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "TYPEGEN_LOG";

fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("aura_typegen=debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let _ = fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
