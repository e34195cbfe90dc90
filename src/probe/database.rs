//! Database connectivity probe.
//!
//! # Responsibilities
//! - Open one connection to the target
//! - Run a trivial query and read one row back
//! - Close the connection on every path before returning
//! - Sort driver errors into `NotReady` and fatal

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::config::ConnectionTarget;
use crate::probe::{ProbeError, ProbeOutcome, ReadinessProbe};

/// Opens sessions to a SQL server.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;

    async fn connect(&self, target: &ConnectionTarget) -> Result<Self::Session, sqlx::Error>;

    /// Whether `err` means "not accepting connections yet".
    fn is_transient(&self, err: &sqlx::Error) -> bool;
}

/// One open connection. `close` consumes it, so it cannot run twice.
#[async_trait]
pub trait Session: Send {
    /// Execute the confirmatory query and fetch its single row.
    async fn ping(&mut self) -> Result<(), sqlx::Error>;

    async fn close(self) -> Result<(), sqlx::Error>;
}

/// Readiness probe backed by a [`Connector`].
pub struct DatabaseProbe<C> {
    connector: C,
    target: ConnectionTarget,
    connect_timeout: Duration,
}

impl<C: Connector> DatabaseProbe<C> {
    pub fn new(connector: C, target: ConnectionTarget, connect_timeout: Duration) -> Self {
        Self {
            connector,
            target,
            connect_timeout,
        }
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn classify(&self, err: sqlx::Error) -> Result<ProbeOutcome, ProbeError> {
        if self.connector.is_transient(&err) {
            Ok(ProbeOutcome::NotReady(err.to_string()))
        } else {
            Err(ProbeError::Fatal(err))
        }
    }
}

#[async_trait]
impl<C: Connector> ReadinessProbe for DatabaseProbe<C> {
    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        let connecting = self.connector.connect(&self.target);
        let mut session = match time::timeout(self.connect_timeout, connecting).await {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return self.classify(e),
            Err(_) => {
                return Ok(ProbeOutcome::NotReady(format!(
                    "connection to {} timed out after {}s",
                    self.target.address(),
                    self.connect_timeout.as_secs()
                )));
            }
        };

        let pinged = session.ping().await;

        // Runs whether or not the query succeeded.
        if let Err(e) = session.close().await {
            tracing::debug!(error = %e, "Closing probe connection failed");
        }

        match pinged {
            Ok(()) => Ok(ProbeOutcome::Ready),
            Err(e) => self.classify(e),
        }
    }
}
