//! Driving port for resource CRUD use-cases.
//!
//! Inbound adapters call this port with already parsed identifiers and
//! payloads. Implementations own lookup, validation, patch application and
//! persistence, and report failures as domain [`Error`] values.

use async_trait::async_trait;

use crate::domain::{EntityId, Error, PatchDocument, Resource};

/// Domain use-case port for one resource collection.
#[async_trait]
pub trait ResourceCrud<R: Resource>: Send + Sync {
    /// Fetch a single resource.
    async fn get(&self, id: &EntityId) -> Result<R, Error>;

    /// Fetch every resource ordered by identifier.
    ///
    /// An empty collection is reported as `not_found`.
    async fn list(&self) -> Result<Vec<R>, Error>;

    /// Store a new resource under a freshly generated identifier.
    async fn create(&self, payload: R) -> Result<R, Error>;

    /// Overwrite every mutable field of the resource identified by `id`.
    ///
    /// The payload's identifier must equal `id`.
    async fn replace(&self, id: &EntityId, payload: R) -> Result<(), Error>;

    /// Apply a patch document to the stored resource and persist the result.
    async fn partial_update(&self, id: &EntityId, patch: &PatchDocument) -> Result<(), Error>;

    /// Remove a resource.
    async fn delete(&self, id: &EntityId) -> Result<(), Error>;
}
