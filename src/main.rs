//! pg-wait
//!
//! Blocks a CI job or container entrypoint until Postgres accepts
//! connections and answers `SELECT 1`, then exits 0.
//!
//! # Flow
//!
//! ```text
//!   flags ─┐
//!   file ──┼─▶ Settings ─▶ DatabaseProbe(PgConnector) ─▶ PollingWaiter::wait
//!   env ───┘                                                 │
//!                                       ready ─▶ exit 0 ◀────┤
//!                                       fatal ─▶ exit 1 ◀────┤
//!                                 SIGINT/TERM ─▶ exit 130 ◀──┘
//! ```
//!
//! Configuration errors exit 2.

use std::process::ExitCode;

use clap::Parser;

use pg_wait::config::{CliArgs, ProcessEnv, Settings};
use pg_wait::lifecycle::exit::{exit_status, EXIT_CONFIG};
use pg_wait::lifecycle::{signals, Shutdown};
use pg_wait::observability::logging;
use pg_wait::probe::{DatabaseProbe, PgConnector};
use pg_wait::waiter::{PollingWaiter, WaitError};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init_logging(args.log_level);

    let settings = match Settings::resolve(&args, &ProcessEnv) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let connector = match PgConnector::from_mode_name(&settings.ssl_mode) {
        Ok(connector) => connector,
        Err(e) => {
            tracing::error!(error = %e, "Invalid ssl mode");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let target = &settings.target;
    tracing::info!(
        host = %target.host(),
        port = target.port(),
        user = %target.user(),
        db = %target.database(),
        delay_secs = settings.waiter.interval.as_secs(),
        "Connection info"
    );
    tracing::info!("Trying to connect {}..", target.address());

    let probe = DatabaseProbe::new(connector, settings.target.clone(), settings.connect_timeout);
    let waiter = PollingWaiter::new(probe, settings.waiter);

    let shutdown = Shutdown::new();
    let mut cancelled = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    let result = waiter.wait(&mut cancelled).await;
    // Ready and fatal outcomes are already logged by the waiter.
    if let Err(e @ WaitError::Cancelled { .. }) = &result {
        tracing::warn!(error = %e, "Stopped before the database became ready");
    }
    ExitCode::from(exit_status(&result))
}
