//! Database configuration.
//!
//! Credentials come from five environment variables. A `.env` file in the
//! working directory is honoured by [`DbConfig::from_env`].
//!
//! | Variable      | Required | Default |
//! |---------------|----------|---------|
//! | `DB_USER`     | yes      |         |
//! | `DB_PASSWORD` | yes      |         |
//! | `DB_HOST`     | yes      |         |
//! | `DB_PORT`     | no       | `3306`  |
//! | `DB_NAME`     | yes      |         |

use sqlx::mysql::MySqlConnectOptions;
use std::env;
use std::fmt;
use std::time::Duration;

pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_NAME: &str = "DB_NAME";

pub const DEFAULT_PORT: u16 = 3306;

/// Connection settings for the inventory database.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Maximum number of pooled connections.
    /// Default: 4 (one user, one action at a time)
    pub max_connections: u32,

    /// How long to wait for a connection before giving up.
    /// Default: 10 seconds
    pub connect_timeout: Duration,
}

impl DbConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        DbConfig {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
            max_connections: 4,
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Loads `.env` (if present) and then reads the `DB_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as missing. A blank `DB_PORT` falls back to the
    /// default like an absent one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingRequired(key.to_string()));

        let user = require(ENV_USER)?;
        let password = require(ENV_PASSWORD)?;
        let host = require(ENV_HOST)?;
        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(ENV_PORT.to_string()))?,
            None => DEFAULT_PORT,
        };
        let database = require(ENV_NAME)?;

        Ok(DbConfig::new(host, port, user, password, database))
    }

    /// Driver options built field by field, so credentials never pass
    /// through a URL string.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Password is redacted.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
