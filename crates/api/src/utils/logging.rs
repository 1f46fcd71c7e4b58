//! Tracing subscriber setup.

use launchbot_domain::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber once.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this twice
/// is harmless; the second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if installed.is_ok() {
        tracing::debug!(level = %config.level, json = config.json, "tracing initialised");
    }
}
