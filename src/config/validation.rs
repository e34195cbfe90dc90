//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and `FromStr` handle syntax)
//! - Validate value ranges (interval > 0, port valid)
//! - Reject TLS modes the driver does not know
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TargetConfig + WaitSection → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{TargetConfig, WaitSection};

/// TLS modes understood by the Postgres connector.
pub const SSL_MODES: &[&str] = &["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

/// A single semantic problem with the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("port must be between 1 and 65535")]
    InvalidPort,

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("unknown ssl mode '{0}'")]
    UnknownSslMode(String),
}

pub fn validate(target: &TargetConfig, wait: &WaitSection) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("host", &target.host),
        ("database", &target.database),
        ("user", &target.user),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    // u16 bounds the top of the range.
    if target.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if wait.interval_secs == 0 {
        errors.push(ValidationError::NotPositive { field: "interval" });
    }

    if target.connect_timeout_secs == 0 {
        errors.push(ValidationError::NotPositive { field: "connect timeout" });
    }

    if !SSL_MODES.contains(&target.ssl_mode.as_str()) {
        errors.push(ValidationError::UnknownSslMode(target.ssl_mode.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
