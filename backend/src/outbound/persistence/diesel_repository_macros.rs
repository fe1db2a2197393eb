//! Shared macro for Diesel-backed resource repositories.

/// Generate a pooled Diesel adapter implementing `ResourceRepository`.
///
/// The generated adapter:
/// - checks out one pooled connection per call
/// - matches the unique key with `lower(column) = lower($1)`
/// - lists rows ordered by `id`
/// - reports unique index violations as `DuplicateKey`
macro_rules! diesel_resource_repository {
    (
        $(#[$meta:meta])*
        pub struct $repo:ident for $resource:ty {
            table: $table:ident,
            unique_key: $key:ident,
            row: $row:ty,
            new_row: $new_row:ty,
            update: $update:ty $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            /// Create a repository over `pool`.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }

            fn diesel_error(error: diesel::result::Error) -> ResourceRepositoryError {
                map_diesel_error(error, <$resource as Resource>::UNIQUE_FIELD)
            }
        }

        #[async_trait::async_trait]
        impl ResourceRepository<$resource> for $repo {
            async fn find_by_id(
                &self,
                id: &EntityId,
            ) -> Result<Option<$resource>, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row = $table::table
                    .find(*id.as_uuid())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(Self::diesel_error)?;
                Ok(row.map(<$resource>::from))
            }

            async fn find_by_unique_key(
                &self,
                key: &str,
            ) -> Result<Option<$resource>, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row = $table::table
                    .filter(lower($table::$key).eq(lower(key)))
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(Self::diesel_error)?;
                Ok(row.map(<$resource>::from))
            }

            async fn list(&self) -> Result<Vec<$resource>, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .order($table::id.asc())
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(Self::diesel_error)?;
                Ok(rows.into_iter().map(<$resource>::from).collect())
            }

            async fn insert(&self, resource: &$resource) -> Result<(), ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                diesel::insert_into($table::table)
                    .values(<$new_row>::from(resource))
                    .execute(&mut conn)
                    .await
                    .map_err(Self::diesel_error)?;
                Ok(())
            }

            async fn update(&self, resource: &$resource) -> Result<bool, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let updated = diesel::update($table::table.find(*resource.id().as_uuid()))
                    .set(<$update>::from(resource))
                    .execute(&mut conn)
                    .await
                    .map_err(Self::diesel_error)?;
                Ok(updated > 0)
            }

            async fn delete(&self, id: &EntityId) -> Result<bool, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let deleted = diesel::delete($table::table.find(*id.as_uuid()))
                    .execute(&mut conn)
                    .await
                    .map_err(Self::diesel_error)?;
                Ok(deleted > 0)
            }
        }
    };
}

pub(crate) use diesel_resource_repository;
