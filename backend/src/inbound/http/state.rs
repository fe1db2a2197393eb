//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{InMemoryResourceRepository, ResourceCrud};
use crate::domain::{Product, Recipe, ResourceService, User};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ResourceCrud<Product>>,
    pub recipes: Arc<dyn ResourceCrud<Recipe>>,
    pub users: Arc<dyn ResourceCrud<User>>,
}

impl HttpState {
    /// Construct state from one CRUD port per resource.
    pub fn new(
        products: Arc<dyn ResourceCrud<Product>>,
        recipes: Arc<dyn ResourceCrud<Recipe>>,
        users: Arc<dyn ResourceCrud<User>>,
    ) -> Self {
        Self {
            products,
            recipes,
            users,
        }
    }

    /// State backed by empty process-local repositories.
    ///
    /// # Examples
    /// ```
    /// use pantry::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::in_memory();
    /// let _products = state.products.clone();
    /// ```
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(ResourceService::new(Arc::new(
                InMemoryResourceRepository::<Product>::default(),
            ))),
            Arc::new(ResourceService::new(Arc::new(
                InMemoryResourceRepository::<Recipe>::default(),
            ))),
            Arc::new(ResourceService::new(Arc::new(
                InMemoryResourceRepository::<User>::default(),
            ))),
        )
    }
}
