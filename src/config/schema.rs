//! Configuration schema definitions.
//!
//! `WaitFileConfig` is the on-disk shape (every field defaulted so a partial
//! file is valid). `ConnectionTarget` and `WaiterConfig` are the resolved,
//! immutable values handed to the probe and the waiter.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root of the optional TOML configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WaitFileConfig {
    /// Database to wait for.
    pub target: TargetConfig,

    /// Polling behaviour.
    pub wait: WaitSection,
}

/// Target database settings as they appear in the file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,

    /// TLS negotiation mode (libpq names, e.g. "prefer", "require").
    pub ssl_mode: String,

    /// Upper bound on a single connection attempt, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            ssl_mode: "prefer".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Polling settings as they appear in the file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WaitSection {
    /// Delay between two readiness attempts, in seconds.
    pub interval_secs: u64,
}

impl Default for WaitSection {
    fn default() -> Self {
        Self { interval_secs: 2 }
    }
}

/// Where to find the database and who to connect as.
///
/// Built once from resolved configuration and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
}

impl ConnectionTarget {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Empty when no password was configured.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// `host:port`, for log lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Polling settings for [`crate::waiter::PollingWaiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaiterConfig {
    /// Fixed delay between a `NotReady` result and the next attempt.
    pub interval: Duration,
}

impl WaiterConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(WaitSection::default().interval_secs),
        }
    }
}
