//! Embedded schema migrations.
//!
//! Diesel's migration harness needs a synchronous connection, so callers on
//! an async runtime should run [`run_migrations`] via `spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },

    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Apply`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
