//! Configuration loading and layering.
//!
//! Each setting is resolved once, at startup, highest precedence first:
//! `POSTGRES_*` environment variable, command-line flag, config file,
//! schema default. The result is an immutable [`Settings`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::config::cli::CliArgs;
use crate::config::schema::{ConnectionTarget, WaitFileConfig, WaiterConfig};
use crate::config::validation::{validate, ValidationError};

pub const ENV_HOST: &str = "POSTGRES_HOST";
pub const ENV_PORT: &str = "POSTGRES_PORT";
pub const ENV_DB: &str = "POSTGRES_DB";
pub const ENV_USER: &str = "POSTGRES_USER";
pub const ENV_PASSWORD: &str = "POSTGRES_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Source of environment variables.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Pick the environment value for `key` if it is set, else the flag value.
///
/// A set variable wins even when empty. Its text is parsed with the same
/// `FromStr` a flag would use.
pub fn resolve<T: FromStr>(
    env: &impl EnvSource,
    key: &'static str,
    flag: Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env.get(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(flag),
    }
}

/// Load a TOML config file. Validation happens after all layers are merged.
pub fn load_file(path: &Path) -> Result<WaitFileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Fully resolved, validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target: ConnectionTarget,
    pub waiter: WaiterConfig,
    pub connect_timeout: Duration,
    pub ssl_mode: String,
}

impl Settings {
    /// Merge flags, optional file and environment into validated settings.
    pub fn resolve(args: &CliArgs, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => load_file(path)?,
            None => WaitFileConfig::default(),
        };
        Self::from_layers(base, args, env)
    }

    /// Same as [`Settings::resolve`] with the file layer already loaded.
    pub fn from_layers(
        base: WaitFileConfig,
        args: &CliArgs,
        env: &impl EnvSource,
    ) -> Result<Self, ConfigError> {
        let WaitFileConfig { mut target, mut wait } = base;

        if let Some(host) = resolve(env, ENV_HOST, args.host.clone())? {
            target.host = host;
        }
        if let Some(port) = resolve(env, ENV_PORT, args.port)? {
            target.port = port;
        }
        if let Some(database) = resolve(env, ENV_DB, args.db.clone())? {
            target.database = database;
        }
        if let Some(user) = resolve(env, ENV_USER, args.user.clone())? {
            target.user = user;
        }
        if let Some(password) = resolve(env, ENV_PASSWORD, args.password.clone())? {
            target.password = password;
        }

        // No environment override for these.
        if let Some(delay) = args.delay {
            wait.interval_secs = delay;
        }
        if let Some(timeout) = args.connect_timeout {
            target.connect_timeout_secs = timeout;
        }
        if let Some(mode) = &args.ssl_mode {
            target.ssl_mode = mode.clone();
        }

        validate(&target, &wait).map_err(ConfigError::Validation)?;

        Ok(Self {
            target: ConnectionTarget::new(
                target.host,
                target.port,
                target.database,
                target.user,
                target.password,
            ),
            waiter: WaiterConfig::new(Duration::from_secs(wait.interval_secs)),
            connect_timeout: Duration::from_secs(target.connect_timeout_secs),
            ssl_mode: target.ssl_mode,
        })
    }
}
