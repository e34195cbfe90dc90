//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast → PollingWaiter stops at its next await point
//!
//! Exit (exit.rs):
//!     wait result → process exit status
//! ```
//!
//! # Design Decisions
//! - The only cancellation path is external; the core has no deadline
//! - Dropping the coordinator also stops subscribers

pub mod exit;
pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
