//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every CRUD endpoint, the health probes and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::crud::PatchOperationBody;
use crate::inbound::http::products::ProductBody;
use crate::inbound::http::recipes::RecipeBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FieldViolationSchema};
use crate::inbound::http::users::UserBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry API",
        description = "CRUD access to products, recipes and users, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::replace_product,
        crate::inbound::http::products::patch_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::replace_recipe,
        crate::inbound::http::recipes::patch_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProductBody,
        RecipeBody,
        UserBody,
        PatchOperationBody,
        ErrorSchema,
        ErrorCodeSchema,
        FieldViolationSchema
    )),
    tags(
        (name = "products", description = "Food products and their calorie counts"),
        (name = "recipes", description = "Recipes with an optional picture"),
        (name = "users", description = "User records keyed by e-mail address"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
