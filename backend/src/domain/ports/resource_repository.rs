//! Driven port for resource persistence.
//!
//! [`ResourceRepository`] is the persistence gateway used by the resource
//! service. Every mutation commits before returning. Adapters must make the
//! uniqueness check atomic with the write: the relational adapter leans on a
//! unique index over the lower-cased key, and [`InMemoryResourceRepository`]
//! performs check-and-write while holding one lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{EntityId, Resource, normalise_unique_key};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource repository query failed: {message}",
        /// A write would break a uniqueness constraint.
        DuplicateKey { field: String } =>
            "resource repository rejected duplicate {field}",
    }
}

/// Port for storing and retrieving one resource type.
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Fetch a resource by identifier.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<R>, ResourceRepositoryError>;

    /// Fetch the resource whose unique key matches `key`, ignoring case.
    async fn find_by_unique_key(&self, key: &str) -> Result<Option<R>, ResourceRepositoryError>;

    /// Fetch every stored resource ordered by identifier.
    async fn list(&self) -> Result<Vec<R>, ResourceRepositoryError>;

    /// Persist a new resource.
    ///
    /// Fails with [`ResourceRepositoryError::DuplicateKey`] when another
    /// resource already holds the same identifier or unique key.
    async fn insert(&self, resource: &R) -> Result<(), ResourceRepositoryError>;

    /// Overwrite the stored resource with the same identifier.
    ///
    /// Returns `false` when no such resource exists.
    async fn update(&self, resource: &R) -> Result<bool, ResourceRepositoryError>;

    /// Remove a resource.
    ///
    /// Returns `false` when no such resource exists.
    async fn delete(&self, id: &EntityId) -> Result<bool, ResourceRepositoryError>;
}

/// Process-local repository used when no database is configured and in tests.
///
/// # Examples
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use pantry::domain::{EntityId, Product};
/// use pantry::domain::ports::{InMemoryResourceRepository, ResourceRepository};
///
/// let repo = InMemoryResourceRepository::<Product>::default();
/// let eggs = Product::new(EntityId::random(), "Eggs", "", 70);
/// repo.insert(&eggs).await.expect("insert");
/// let found = repo.find_by_unique_key("EGGS").await.expect("lookup");
/// assert_eq!(found, Some(eggs));
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryResourceRepository<R: Resource> {
    records: RwLock<BTreeMap<EntityId, R>>,
}

impl<R: Resource> Default for InMemoryResourceRepository<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<R: Resource> InMemoryResourceRepository<R> {
    /// Build a repository pre-populated with `resources`.
    pub fn with_records(resources: impl IntoIterator<Item = R>) -> Self {
        let records = resources
            .into_iter()
            .map(|resource| (*resource.id(), resource))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    fn key_taken(records: &BTreeMap<EntityId, R>, candidate: &R) -> bool {
        let key = normalise_unique_key(candidate.unique_key());
        records.values().any(|existing| {
            existing.id() != candidate.id() && normalise_unique_key(existing.unique_key()) == key
        })
    }
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for InMemoryResourceRepository<R> {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<R>, ResourceRepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_unique_key(&self, key: &str) -> Result<Option<R>, ResourceRepositoryError> {
        let key = normalise_unique_key(key);
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|resource| normalise_unique_key(resource.unique_key()) == key)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<R>, ResourceRepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn insert(&self, resource: &R) -> Result<(), ResourceRepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(resource.id()) {
            return Err(ResourceRepositoryError::duplicate_key("id"));
        }
        if Self::key_taken(&records, resource) {
            return Err(ResourceRepositoryError::duplicate_key(R::UNIQUE_FIELD));
        }
        records.insert(*resource.id(), resource.clone());
        Ok(())
    }

    async fn update(&self, resource: &R) -> Result<bool, ResourceRepositoryError> {
        let mut records = self.records.write().await;
        if !records.contains_key(resource.id()) {
            return Ok(false);
        }
        if Self::key_taken(&records, resource) {
            return Err(ResourceRepositoryError::duplicate_key(R::UNIQUE_FIELD));
        }
        records.insert(*resource.id(), resource.clone());
        Ok(true)
    }

    async fn delete(&self, id: &EntityId) -> Result<bool, ResourceRepositoryError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, User};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryResourceRepository<Product> {
        InMemoryResourceRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_case_insensitive_duplicates(repo: InMemoryResourceRepository<Product>) {
        repo.insert(&Product::new(EntityId::random(), "Eggs", "", 70))
            .await
            .expect("first insert");

        let err = repo
            .insert(&Product::new(EntityId::random(), "eGGS", "", 80))
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err, ResourceRepositoryError::duplicate_key("name"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_reused_identifier(repo: InMemoryResourceRepository<Product>) {
        let id = EntityId::random();
        repo.insert(&Product::new(id, "Eggs", "", 70))
            .await
            .expect("first insert");

        let err = repo
            .insert(&Product::new(id, "Milk", "", 40))
            .await
            .expect_err("id reuse rejected");

        assert_eq!(err, ResourceRepositoryError::duplicate_key("id"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_ordered_by_identifier(repo: InMemoryResourceRepository<Product>) {
        let high = EntityId::from_uuid(uuid::Uuid::from_u128(2));
        let low = EntityId::from_uuid(uuid::Uuid::from_u128(1));
        repo.insert(&Product::new(high, "Milk", "", 40))
            .await
            .expect("insert");
        repo.insert(&Product::new(low, "Eggs", "", 70))
            .await
            .expect("insert");

        let ids: Vec<EntityId> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|product| *product.id())
            .collect();

        assert_eq!(ids, vec![low, high]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_own_key_but_rejects_anothers() {
        let ada = User::new(EntityId::random(), "ada@example.com", "one");
        let bob = User::new(EntityId::random(), "bob@example.com", "two");
        let repo = InMemoryResourceRepository::with_records([ada.clone(), bob.clone()]);

        let renamed = User::new(*ada.id(), "ADA@example.com", "three");
        assert!(repo.update(&renamed).await.expect("update own key"));

        let clash = User::new(*bob.id(), "ada@EXAMPLE.com", "two");
        let err = repo.update(&clash).await.expect_err("clash rejected");
        assert_eq!(err, ResourceRepositoryError::duplicate_key("email"));
        assert_eq!(
            repo.find_by_id(bob.id()).await.expect("lookup"),
            Some(bob)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_records(repo: InMemoryResourceRepository<Product>) {
        let ghost = Product::new(EntityId::random(), "Ghost", "", 0);

        assert!(!repo.update(&ghost).await.expect("update"));
        assert!(!repo.delete(ghost.id()).await.expect("delete"));
    }

    #[rstest]
    fn error_messages_name_the_problem() {
        assert_eq!(
            ResourceRepositoryError::query("syntax error").to_string(),
            "resource repository query failed: syntax error"
        );
        assert_eq!(
            ResourceRepositoryError::duplicate_key("email").to_string(),
            "resource repository rejected duplicate email"
        );
    }
}
