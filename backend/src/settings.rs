//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CONTACTS_*` environment variables, CLI flags or a
//! config file. Every field has a default so the server starts without any
//! configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "db.sqlite";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Errors raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The pool must hold at least one connection.
    #[error("pool size must be at least 1")]
    EmptyPool,
}

/// Startup configuration for the contact book server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// SQLite database file, created when absent.
    #[ortho_config(default = PathBuf::from(DEFAULT_DATABASE_PATH))]
    pub database_path: PathBuf,
    /// Maximum pooled connections.
    #[ortho_config(default = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,
    /// Username of the account seeded at startup.
    #[ortho_config(default = DEFAULT_ADMIN_USERNAME.to_owned())]
    pub admin_username: String,
    /// Initial password of the seeded account.
    #[ortho_config(default = DEFAULT_ADMIN_PASSWORD.to_owned())]
    pub admin_password: String,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Database file path.
    pub fn database_path(&self) -> &Path {
        self.database_path.as_path()
    }

    /// Connection pool size.
    pub fn pool_size(&self) -> Result<u32, SettingsError> {
        match self.pool_size {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Seed account username.
    pub fn admin_username(&self) -> &str {
        self.admin_username.as_str()
    }

    /// Seed account password.
    pub fn admin_password(&self) -> &str {
        self.admin_password.as_str()
    }
}
