//! Process settings loaded via OrthoConfig.
//!
//! Values come from `APP_*` environment variables, matching CLI flags or a
//! configuration file. Everything has a default so a bare `recruit-admin`
//! starts on `0.0.0.0:8080` with in-memory adapters.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Deployment environment. Seeding is refused in [`AppEnvironment::Production`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnvironment {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(SettingsError::UnknownEnvironment(value.to_owned())),
        }
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("APP_BIND_ADDR is not a socket address: {0}")]
    InvalidBindAddr(String),
    #[error("APP_ENVIRONMENT must be development, test or production, got {0}")]
    UnknownEnvironment(String),
    #[error("APP_POOL_SIZE must be at least 1")]
    EmptyPool,
}

/// Server settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server uses in-memory adapters.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
    /// `development`, `test` or `production`.
    pub environment: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr(raw.to_owned()))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_size(&self) -> Result<u32, SettingsError> {
        match self.pool_size.unwrap_or(DEFAULT_POOL_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Deployment environment, defaulting to development.
    pub fn environment(&self) -> Result<AppEnvironment, SettingsError> {
        self.environment
            .as_deref()
            .map_or(Ok(AppEnvironment::Development), str::parse)
    }
}
