//! Postgres connector built on sqlx.
//!
//! # Transient failures
//! Only the following count as "not ready yet":
//! - `sqlx::Error::Io`: refused, reset, unreachable, name resolution
//! - `sqlx::Error::PoolTimedOut`
//! - `08000`, `08001`, `08003`, `08004`, `08006` (connection exceptions)
//! - `57P03` cannot_connect_now (starting up, shutting down, recovery)
//! - `57P01` admin_shutdown, `57P02` crash_shutdown
//! - `53300` too_many_connections
//!
//! Authentication failures (`28000`, `28P01`), an unknown database
//! (`3D000`), protocol violations (`08P01`), TLS and driver protocol errors
//! all surface as fatal.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::{ConnectOptions, Connection};

use crate::config::ConnectionTarget;
use crate::probe::database::{Connector, Session};

const APPLICATION_NAME: &str = "pg-wait";

/// Connects to Postgres with a fresh, unpooled connection per attempt.
#[derive(Debug, Clone)]
pub struct PgConnector {
    ssl_mode: PgSslMode,
}

impl PgConnector {
    pub fn new(ssl_mode: PgSslMode) -> Self {
        Self { ssl_mode }
    }

    /// Build from a libpq mode name such as `"prefer"` or `"verify-full"`.
    pub fn from_mode_name(name: &str) -> Result<Self, sqlx::Error> {
        name.parse().map(Self::new)
    }

    pub fn connect_options(&self, target: &ConnectionTarget) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(target.host())
            .port(target.port())
            .database(target.database())
            .username(target.user())
            .ssl_mode(self.ssl_mode)
            .application_name(APPLICATION_NAME);

        if target.password().is_empty() {
            options
        } else {
            options.password(target.password())
        }
    }
}

impl Default for PgConnector {
    fn default() -> Self {
        Self::new(PgSslMode::Prefer)
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Session = PgSession;

    async fn connect(&self, target: &ConnectionTarget) -> Result<PgSession, sqlx::Error> {
        let conn = self.connect_options(target).connect().await?;
        Ok(PgSession { conn })
    }

    fn is_transient(&self, err: &sqlx::Error) -> bool {
        is_transient(err)
    }
}

/// An open probe connection.
pub struct PgSession {
    conn: PgConnection,
}

#[async_trait]
impl Session for PgSession {
    async fn ping(&mut self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db.code().is_some_and(|code| is_transient_sqlstate(&code)),
        _ => false,
    }
}

pub fn is_transient_sqlstate(code: &str) -> bool {
    matches!(
        code,
        "08000" | "08001" | "08003" | "08004" | "08006" | "57P01" | "57P02" | "57P03" | "53300"
    )
}
