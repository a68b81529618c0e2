//! Diagnostic logging to stderr via `tracing`.
//!
//! The filter comes from `DOCKER2SH_LOG` (EnvFilter syntax); without it the level is `warn`, or
//! `debug` with `--verbose`. Stdout is reserved for the generated script.

use std::env;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;

static INIT: OnceCell<()> = OnceCell::new();

fn default_filter(verbose: bool) -> String {
    env::var("DOCKER2SH_LOG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string())
}

/// Install the global subscriber once; later calls are no-ops.
pub fn telemetry_init(verbose: bool) {
    if INIT.get().is_some() {
        return;
    }

    let env_filter = tracing_subscriber::EnvFilter::new(default_filter(verbose));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("docker2sh: telemetry init skipped (global subscriber already set)");
    }
    let _ = INIT.set(());
}
