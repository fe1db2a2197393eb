//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or conflicts with stored data.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness constraint would be violated.
    #[schema(rename = "conflict")]
    Conflict,
    /// The payload or the patched record breaks field invariants.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::FieldViolation`].
#[derive(ToSchema)]
#[schema(as = FieldViolation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldViolationSchema {
    #[schema(example = "name")]
    field: String,
    #[schema(example = "name is required")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error payload with a machine-readable code and a human-readable
/// message. Validation failures list their violations under
/// `details.violations`.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "product 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}
