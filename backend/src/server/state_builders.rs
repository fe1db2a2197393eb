//! Builders selecting repository adapters for the HTTP state.

use std::sync::Arc;

use pantry::domain::ports::{InMemoryResourceRepository, ResourceRepository};
use pantry::domain::{Product, Recipe, Resource, ResourceService, User};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::persistence::{
    DieselProductRepository, DieselRecipeRepository, DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;

fn service<R: Resource>(
    repository: Arc<dyn ResourceRepository<R>>,
) -> Arc<ResourceService<R, dyn ResourceRepository<R>>> {
    Arc::new(ResourceService::new(repository))
}

/// Build handler state over Diesel repositories when a pool is configured,
/// otherwise over process-local repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "building resource services");
            HttpState::new(
                service::<Product>(Arc::new(DieselProductRepository::new(pool.clone()))),
                service::<Recipe>(Arc::new(DieselRecipeRepository::new(pool.clone()))),
                service::<User>(Arc::new(DieselUserRepository::new(pool.clone()))),
            )
        }
        None => {
            info!(storage = "memory", "building resource services");
            HttpState::new(
                service::<Product>(Arc::new(InMemoryResourceRepository::default())),
                service::<Recipe>(Arc::new(InMemoryResourceRepository::default())),
                service::<User>(Arc::new(InMemoryResourceRepository::default())),
            )
        }
    }
}
