//! Probe and connector doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use pg_wait::config::ConnectionTarget;
use pg_wait::probe::database::{Connector, Session};
use pg_wait::probe::postgres;
use pg_wait::probe::{ProbeError, ProbeOutcome, ReadinessProbe};

pub fn refused() -> sqlx::Error {
    sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
}

pub fn misconfigured() -> sqlx::Error {
    sqlx::Error::Protocol("password authentication failed".into())
}

pub fn example_target() -> ConnectionTarget {
    ConnectionTarget::new("db", 5432, "app", "app", "secret")
}

/// What a [`ScriptedProbe`] returns on each call.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Ready,
    NotReady,
    Fatal,
}

/// Probe that replays a fixed script and records when it was called.
/// Once the script runs out it keeps reporting `NotReady`.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedProbe {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `n` times `NotReady`, then `Ready`.
    pub fn ready_after(n: usize) -> Self {
        Self::new(std::iter::repeat(Step::NotReady).take(n).chain([Step::Ready]))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadinessProbe for ScriptedProbe {
    async fn check(&self) -> Result<ProbeOutcome, ProbeError> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::NotReady);
        match step {
            Step::Ready => Ok(ProbeOutcome::Ready),
            Step::NotReady => Ok(ProbeOutcome::NotReady("connection refused".into())),
            Step::Fatal => Err(ProbeError::Fatal(misconfigured())),
        }
    }
}

/// Behaviour of one `connect` call on a [`FakeConnector`].
#[derive(Debug, Clone, Copy)]
pub enum Connect {
    Refuse,
    Reject,
    Hang,
    Open(Ping),
}

/// Behaviour of `ping` on the session a [`Connect::Open`] produced.
#[derive(Debug, Clone, Copy)]
pub enum Ping {
    Ok,
    Dropped,
    Fatal,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub connects: AtomicU32,
    pub pings: AtomicU32,
    pub closes: AtomicU32,
    pub leaks: AtomicU32,
    pub targets: Mutex<Vec<ConnectionTarget>>,
}

impl Stats {
    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> u32 {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn leaks(&self) -> u32 {
        self.leaks.load(Ordering::SeqCst)
    }
}

pub struct FakeConnector {
    script: Mutex<VecDeque<Connect>>,
    pub stats: Arc<Stats>,
}

impl FakeConnector {
    pub fn new(script: impl IntoIterator<Item = Connect>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            stats: Arc::new(Stats::default()),
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn connect(&self, target: &ConnectionTarget) -> Result<FakeSession, sqlx::Error> {
        self.stats.connects.fetch_add(1, Ordering::SeqCst);
        self.stats.targets.lock().unwrap().push(target.clone());
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Connect::Refuse);
        match step {
            Connect::Refuse => Err(refused()),
            Connect::Reject => Err(misconfigured()),
            Connect::Hang => std::future::pending().await,
            Connect::Open(ping) => Ok(FakeSession {
                ping,
                closed: false,
                stats: self.stats.clone(),
            }),
        }
    }

    fn is_transient(&self, err: &sqlx::Error) -> bool {
        postgres::is_transient(err)
    }
}

pub struct FakeSession {
    ping: Ping,
    closed: bool,
    stats: Arc<Stats>,
}

#[async_trait]
impl Session for FakeSession {
    async fn ping(&mut self) -> Result<(), sqlx::Error> {
        self.stats.pings.fetch_add(1, Ordering::SeqCst);
        match self.ping {
            Ping::Ok => Ok(()),
            Ping::Dropped => Err(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))),
            Ping::Fatal => Err(misconfigured()),
        }
    }

    async fn close(mut self) -> Result<(), sqlx::Error> {
        self.closed = true;
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        if !self.closed {
            self.stats.leaks.fetch_add(1, Ordering::SeqCst);
        }
    }
}
