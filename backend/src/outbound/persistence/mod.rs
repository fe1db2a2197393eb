//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain
//! resources over a shared `bb8` pool of `diesel-async` connections. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module.
//!
//! # Example
//!
//! ```ignore
//! use pantry::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pantry")).await?;
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_repository_macros;
mod diesel_resource_repositories;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_resource_repositories::{
    DieselProductRepository, DieselRecipeRepository, DieselUserRepository,
};
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
