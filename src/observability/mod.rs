//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config/probe/waiter/lifecycle
//!     → tracing events with structured fields
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout, picked up by the CI or orchestrator log stream
//! ```
//!
//! # Design Decisions
//! - Structured fields (attempt, reason, delay_secs) over formatted strings
//! - RUST_LOG always wins over the command-line level
//! - Secrets never reach a log line

pub mod logging;
