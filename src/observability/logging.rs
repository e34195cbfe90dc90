//! Structured logging.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
///
/// The level is already typed, so every directive parses and the ready and
/// fatal notifications stay visible at `info` and above.
pub fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(format!("pg_wait={level},sqlx=warn"))
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: LevelFilter) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
