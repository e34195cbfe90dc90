//! Polling waiter.
//!
//! # State Machine
//! ```text
//! Polling ── check() = Ready ─────────→ Ready (return Ok)
//!    │  ↑
//!    │  └── check() = NotReady → sleep(interval)
//!    │
//!    ├── check() = Err(fatal) ────────→ Failed (return Err, no retry)
//!    └── shutdown signal ─────────────→ Cancelled (return Err)
//! ```
//!
//! # Design Decisions
//! - No retry cap and no deadline; the invoking environment bounds wall-clock time
//! - Fixed interval, no backoff or jitter
//! - Cancellation is external only, via the shutdown broadcast channel

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time;
use thiserror::Error;

use crate::config::WaiterConfig;
use crate::probe::{ProbeError, ProbeOutcome, ReadinessProbe};

/// Ways a wait can end without the dependency becoming ready.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("wait cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u64 },
}

/// Drives a [`ReadinessProbe`] until it reports ready.
pub struct PollingWaiter<P> {
    probe: P,
    config: WaiterConfig,
}

impl<P: ReadinessProbe> PollingWaiter<P> {
    pub fn new(probe: P, config: WaiterConfig) -> Self {
        Self { probe, config }
    }

    pub fn config(&self) -> &WaiterConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Block until the probe reports ready, a fatal error occurs, or
    /// `shutdown` fires. Any message or closure of the channel counts as
    /// a shutdown.
    pub async fn wait(&self, shutdown: &mut broadcast::Receiver<()>) -> Result<(), WaitError> {
        let delay_secs = self.config.interval.as_secs_f64();
        let mut attempts: u64 = 0;

        loop {
            if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                return Err(WaitError::Cancelled { attempts });
            }

            attempts += 1;
            let outcome = tokio::select! {
                outcome = self.probe.check() => outcome,
                _ = shutdown.recv() => {
                    return Err(WaitError::Cancelled { attempts });
                }
            };

            match outcome {
                Ok(ProbeOutcome::Ready) => {
                    tracing::info!(attempts, "Service is ready");
                    return Ok(());
                }
                Ok(ProbeOutcome::NotReady(reason)) => {
                    tracing::warn!(
                        attempt = attempts,
                        reason = %reason,
                        delay_secs,
                        "Service is not ready, retrying in {}s",
                        delay_secs
                    );
                }
                Err(e) => {
                    tracing::error!(attempt = attempts, error = %e, "Readiness probe failed fatally");
                    return Err(e.into());
                }
            }

            tokio::select! {
                _ = time::sleep(self.config.interval) => {}
                _ = shutdown.recv() => {
                    return Err(WaitError::Cancelled { attempts });
                }
            }
        }
    }
}
