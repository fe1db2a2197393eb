//! Translation of pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ResourceRepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> ResourceRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ResourceRepositoryError::connection(message)
        }
    }
}

/// Map a Diesel error, naming `unique_field` when a unique index fires.
///
/// Violations of the primary key constraint (`*_pkey`) are reported against
/// `id` instead.
pub(crate) fn map_diesel_error(
    error: DieselError,
    unique_field: &'static str,
) -> ResourceRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let on_primary_key = info
                .constraint_name()
                .is_some_and(|name| name.ends_with("_pkey"));
            let field = if on_primary_key { "id" } else { unique_field };
            ResourceRepositoryError::duplicate_key(field)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ResourceRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ResourceRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            ResourceRepositoryError::query("database query error")
        }
        _ => ResourceRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info {
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    #[case(Some("products_name_lower_key"), "name")]
    #[case(Some("products_pkey"), "id")]
    #[case(None, "name")]
    fn unique_violation_names_the_field(
        #[case] constraint: Option<&'static str>,
        #[case] field: &str,
    ) {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, constraint),
            "name",
        );
        assert_eq!(error, ResourceRepositoryError::duplicate_key(field));
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection, None),
            "email",
        );
        assert!(matches!(error, ResourceRepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(
            map_diesel_error(error, "name"),
            ResourceRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, ResourceRepositoryError::connection("timed out"));
    }
}
