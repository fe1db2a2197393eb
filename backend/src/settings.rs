//! Application settings loaded via OrthoConfig.
//!
//! Values come from `PANTRY_*` environment variables, command-line flags or a
//! configuration file.

use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Server and storage settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it records live in process memory.
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    pub db_min_idle: Option<u32>,
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Parse the configured listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Whether to apply embedded migrations at startup.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .with_min_idle(Some(self.db_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(
                    self.db_connection_timeout_secs
                        .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
                )),
        )
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_idle", &self.db_min_idle)
            .field("db_connection_timeout_secs", &self.db_connection_timeout_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}
