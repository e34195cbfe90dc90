//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize into schema defaults)
//! command-line flags (cli.rs)
//!     → override file values
//! POSTGRES_* environment variables
//!     → override flags
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is resolved exactly once; the core never reads the environment
//! - All fields have defaults to allow running with no flags at all
//! - Validation separates syntactic (serde/FromStr) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::CliArgs;
pub use loader::{ConfigError, EnvSource, ProcessEnv, Settings};
pub use schema::{ConnectionTarget, WaiterConfig};
