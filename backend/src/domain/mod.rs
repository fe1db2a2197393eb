//! Domain primitives, resources and services.
//!
//! Purpose: define the strongly typed resources exposed by the API and the
//! generic CRUD service that operates on them. Inbound and outbound adapters
//! depend on this module; it depends on neither.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifiers.
//! - Resource: contract shared by Product, Recipe and User.
//! - PatchDocument / apply_patch: field-level partial updates.
//! - ResourceService: the `ResourceCrud` driving port over a repository.

pub mod entity_id;
pub mod error;
pub mod patch;
pub mod ports;
pub mod product;
pub mod recipe;
pub mod resource;
pub mod resource_service;
pub mod trace_id;
pub mod user;

pub use self::entity_id::{EntityId, EntityIdError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::patch::{PatchDocument, PatchOperation, apply_patch};
pub use self::product::Product;
pub use self::recipe::Recipe;
pub use self::resource::{
    FieldDescriptor, FieldKind, FieldValue, FieldViolation, Resource, normalise_unique_key,
};
pub use self::resource_service::ResourceService;
pub use self::trace_id::TraceId;
pub use self::user::User;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pantry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no products"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
