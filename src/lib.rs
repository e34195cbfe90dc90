//! Postgres readiness gate library.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod waiter;

pub use config::{ConnectionTarget, Settings, WaiterConfig};
pub use lifecycle::Shutdown;
pub use probe::{DatabaseProbe, PgConnector, ProbeOutcome, ReadinessProbe};
pub use waiter::{PollingWaiter, WaitError};
