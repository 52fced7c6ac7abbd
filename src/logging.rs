//! Tracing setup for the `budget` binary
//!
//! Library code only emits events; installing a subscriber is left to the
//! binary (or to an embedding application).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "budget_planner=warn";

/// Filter used with `--verbose`
pub const VERBOSE_FILTER: &str = "budget_planner=debug";

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins over `verbose`. Calling this more than once is a no-op.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
