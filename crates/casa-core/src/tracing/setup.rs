//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `CASA_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "casa_core=info,casa_analysis=info";

/// Initialize the casa tracing/logging system.
///
/// Reads `CASA_LOG` for per-crate log levels.
/// Format: `CASA_LOG=casa_analysis=debug,casa_core=warn`
///
/// Falls back to [`DEFAULT_FILTER`] if `CASA_LOG` is not set or is invalid.
/// Calling it more than once is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("CASA_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
