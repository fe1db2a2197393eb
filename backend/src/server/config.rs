//! HTTP server configuration object.

use std::net::SocketAddr;

use pantry::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database pool; repositories become Diesel-backed.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
