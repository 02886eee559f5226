//! Tracing subscriber initialisation.
//!
//! Only the binary calls [`init_logging`]; library code reports through an
//! [`EventSink`](crate::events::EventSink) and never touches subscribers.
//!
//! | Flag        | Filter level |
//! |-------------|--------------|
//! | (none)      | INFO         |
//! | `--verbose` | DEBUG        |
//!
//! `RUST_LOG` overrides both if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr fmt subscriber. Fails if one is already installed.
pub fn init_logging(verbose: bool) -> Result<(), String> {
    let level = derive_level(verbose);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contextify={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| format!("failed to initialise logging: {e}"))
}

fn derive_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
