//! Readiness probing subsystem.
//!
//! # Data Flow
//! ```text
//! PollingWaiter
//!     → ReadinessProbe::check()
//!         → database.rs: connect → SELECT 1 → close
//!             → postgres.rs: sqlx connection + error classification
//!     ← Ready | NotReady(reason) | Err(ProbeError)
//! ```
//!
//! # Design Decisions
//! - One attempt per `check()`; retrying is the waiter's job
//! - Transient connectivity failures are values (`NotReady`), not errors
//! - Anything else is a `ProbeError` and must reach the caller untouched

use async_trait::async_trait;
use thiserror::Error;

pub mod database;
pub mod postgres;

pub use database::{Connector, DatabaseProbe, Session};
pub use postgres::PgConnector;

/// Result of a single readiness attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready,
    /// The service could not be reached yet; carries a human-readable reason.
    NotReady(String),
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

/// Failure that retrying cannot fix.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Fatal(sqlx::Error),
}

/// A single readiness check against one dependency.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Attempt one check. Must not retry internally.
    async fn check(&self) -> Result<ProbeOutcome, ProbeError>;
}
