//! Command-line flags.
//!
//! Flags carry no defaults of their own: an absent flag falls through to the
//! config file and then to the schema defaults, and a set `POSTGRES_*`
//! variable overrides a flag.

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Parser)]
#[command(name = "pg-wait")]
#[command(about = "Block until a Postgres server accepts connections and answers queries", long_about = None)]
pub struct CliArgs {
    /// Host to connect to [env: POSTGRES_HOST] [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to connect to [env: POSTGRES_PORT] [default: 5432]
    #[arg(long)]
    pub port: Option<u16>,

    /// Database to connect to [env: POSTGRES_DB] [default: postgres]
    #[arg(long)]
    pub db: Option<String>,

    /// User to connect as [env: POSTGRES_USER] [default: postgres]
    #[arg(long)]
    pub user: Option<String>,

    /// Password to connect with [env: POSTGRES_PASSWORD]
    #[arg(long)]
    pub password: Option<String>,

    /// Seconds to wait before reconnecting [default: 2]
    #[arg(long)]
    pub delay: Option<u64>,

    /// Seconds allowed for a single connection attempt [default: 5]
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// TLS mode: disable, allow, prefer, require, verify-ca, verify-full [default: prefer]
    #[arg(long)]
    pub ssl_mode: Option<String>,

    /// Optional TOML file with [target] and [wait] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            db: None,
            user: None,
            password: None,
            delay: None,
            connect_timeout: None,
            ssl_mode: None,
            config: None,
            log_level: LevelFilter::INFO,
        }
    }
}
