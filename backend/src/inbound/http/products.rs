//! Products API handlers.
//!
//! ```text
//! GET    /api/Products
//! GET    /api/Products/{id}
//! POST   /api/Products {"name":"Eggs","description":"Free range","kcal":70}
//! PUT    /api/Products/{id}
//! PATCH  /api/Products/{id} [{"op":"replace","path":"/kcal","value":80}]
//! DELETE /api/Products/{id}
//! ```

use actix_web::{HttpResponse, Scope, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EntityId, Product, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::crud::{self, PatchOperationBody, ResourceBody, null_as_default};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Product as exchanged over HTTP.
///
/// Example JSON:
/// `{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","name":"Eggs","description":"Free range","kcal":70}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Product)]
pub struct ProductBody {
    /// Server-assigned identifier; ignored on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
    /// Unique name, compared case-insensitively.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "Eggs")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Energy per portion in kilocalories.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = 70)]
    pub kcal: i32,
}

impl ResourceBody for ProductBody {
    type Resource = Product;
    const COLLECTION_PATH: &'static str = "/api/Products";

    fn payload_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_resource(self, id: EntityId) -> Product {
        Product::new(id, self.name, self.description, self.kcal)
    }

    fn from_resource(product: &Product) -> Self {
        Self {
            id: Some(product.id().to_string()),
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            kcal: product.kcal(),
        }
    }
}

/// Routes mounted under `/api/Products`.
pub fn scope() -> Scope {
    web::scope(ProductBody::COLLECTION_PATH)
        .service(list_products)
        .service(create_product)
        .service(get_product)
        .service(replace_product)
        .service(patch_product)
        .service(delete_product)
}

/// List every product ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/Products",
    responses(
        (status = 200, description = "Products", body = [ProductBody]),
        (status = 404, description = "No products exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProductBody>>> {
    crud::fetch_all(state.products.as_ref()).await.map(web::Json)
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/Products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = ProductBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductBody>> {
    crud::fetch(state.products.as_ref(), &path)
        .await
        .map(web::Json)
}

/// Create a product under a server-assigned identifier.
#[utoipa::path(
    post,
    path = "/api/Products",
    request_body = ProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductBody,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Invalid payload or duplicate name", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductBody>,
) -> ApiResult<HttpResponse> {
    crud::create(state.products.as_ref(), payload.into_inner()).await
}

/// Overwrite every field of a product.
#[utoipa::path(
    put,
    path = "/api/Products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = ProductBody,
    responses(
        (status = 204, description = "Product replaced"),
        (status = 400, description = "Invalid or mismatched payload", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "replaceProduct"
)]
#[put("/{id}")]
pub async fn replace_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProductBody>,
) -> ApiResult<HttpResponse> {
    crud::replace(state.products.as_ref(), &path, payload.into_inner()).await
}

/// Apply a JSON Patch document to a product.
#[utoipa::path(
    patch,
    path = "/api/Products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    request_body(content = [PatchOperationBody], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Product patched"),
        (status = 400, description = "Invalid patch or resulting product", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "patchProduct"
)]
#[patch("/{id}")]
pub async fn patch_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Vec<PatchOperationBody>>,
) -> ApiResult<HttpResponse> {
    crud::patch(state.products.as_ref(), &path, payload.into_inner()).await
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/Products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    crud::remove(state.products.as_ref(), &path).await
}
