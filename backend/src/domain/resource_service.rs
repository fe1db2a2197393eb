//! Generic resource CRUD service.
//!
//! One [`ResourceService`] is instantiated per resource type. It implements
//! the [`ResourceCrud`] driving port on top of a [`ResourceRepository`],
//! enforcing required fields, case-insensitive uniqueness and the
//! partial-update rules before anything is committed.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{ResourceCrud, ResourceRepository, ResourceRepositoryError};
use crate::domain::{EntityId, Error, PatchDocument, Resource, apply_patch};

/// Resource service implementing the driving port for `R`.
pub struct ResourceService<R, G: ?Sized> {
    repository: Arc<G>,
    resource: PhantomData<fn() -> R>,
}

impl<R, G: ?Sized> Clone for ResourceService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            resource: PhantomData,
        }
    }
}

impl<R, G: ?Sized> ResourceService<R, G> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<G>) -> Self {
        Self {
            repository,
            resource: PhantomData,
        }
    }
}

impl<R, G> ResourceService<R, G>
where
    R: Resource,
    G: ResourceRepository<R> + ?Sized,
{
    fn map_repository_error(error: ResourceRepositoryError) -> Error {
        match error {
            ResourceRepositoryError::DuplicateKey { field } => Self::duplicate(&field),
            ResourceRepositoryError::Connection { message } => {
                Error::internal(format!("{} repository unavailable: {message}", R::NAME))
            }
            ResourceRepositoryError::Query { message } => {
                Error::internal(format!("{} repository error: {message}", R::NAME))
            }
        }
    }

    fn duplicate(field: &str) -> Error {
        Error::conflict(format!("a {} with this {field} already exists", R::NAME)).with_details(
            json!({
                "field": field,
                "code": "duplicate_key",
            }),
        )
    }

    fn not_found(id: &EntityId) -> Error {
        Error::not_found(format!("{} {id} not found", R::NAME))
    }

    fn ensure_valid(resource: &R) -> Result<(), Error> {
        let violations = resource.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::validation_failed(violations))
        }
    }

    async fn load(&self, id: &EntityId) -> Result<Option<R>, Error> {
        debug!(resource = R::NAME, %id, "looking up resource");
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R, G> ResourceCrud<R> for ResourceService<R, G>
where
    R: Resource,
    G: ResourceRepository<R> + ?Sized,
{
    async fn get(&self, id: &EntityId) -> Result<R, Error> {
        self.load(id).await?.ok_or_else(|| Self::not_found(id))
    }

    async fn list(&self) -> Result<Vec<R>, Error> {
        debug!(resource = R::NAME, "listing resources");
        let resources = self
            .repository
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        if resources.is_empty() {
            return Err(Error::not_found(format!("no {} records exist", R::NAME)));
        }
        Ok(resources)
    }

    async fn create(&self, payload: R) -> Result<R, Error> {
        Self::ensure_valid(&payload)?;

        let existing = self
            .repository
            .find_by_unique_key(payload.unique_key())
            .await
            .map_err(Self::map_repository_error)?;
        if existing.is_some() {
            return Err(Self::duplicate(R::UNIQUE_FIELD));
        }

        let resource = payload.with_id(EntityId::random());
        self.repository
            .insert(&resource)
            .await
            .map_err(Self::map_repository_error)?;
        info!(resource = R::NAME, id = %resource.id(), "created resource");
        Ok(resource)
    }

    async fn replace(&self, id: &EntityId, payload: R) -> Result<(), Error> {
        if payload.id() != id {
            return Err(Error::invalid_request(format!(
                "{} id in the body does not match the path",
                R::NAME
            )));
        }
        Self::ensure_valid(&payload)?;

        let mut stored = self.load(id).await?.ok_or_else(|| Self::not_found(id))?;
        stored.overwrite_from(&payload);

        let updated = self
            .repository
            .update(&stored)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            return Err(Self::not_found(id));
        }
        info!(resource = R::NAME, %id, "replaced resource");
        Ok(())
    }

    async fn partial_update(&self, id: &EntityId, patch: &PatchDocument) -> Result<(), Error> {
        let Some(stored) = self.load(id).await? else {
            return Err(Error::invalid_request(format!(
                "{} {id} does not exist",
                R::NAME
            )));
        };

        let patched = apply_patch(&stored, patch).map_err(Error::validation_failed)?;

        let updated = self
            .repository
            .update(&patched)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            return Err(Error::invalid_request(format!(
                "{} {id} does not exist",
                R::NAME
            )));
        }
        info!(
            resource = R::NAME,
            %id,
            operations = patch.len(),
            "patched resource"
        );
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(resource = R::NAME, %id, "deleted resource");
        Ok(())
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
