//! Recipes API handlers.
//!
//! Same contract as the products endpoints, under `/api/Recipes`. The picture
//! reference travels as `imageURL`; `imageUrl` is accepted on input.

use actix_web::{HttpResponse, Scope, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EntityId, Recipe, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::crud::{self, PatchOperationBody, ResourceBody, null_as_default};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Recipe as exchanged over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Recipe)]
pub struct RecipeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = Uuid)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "Shakshuka")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(
        rename = "imageURL",
        alias = "imageUrl",
        default,
        deserialize_with = "null_as_default"
    )]
    #[schema(example = "/img/shakshuka.png")]
    pub image_url: String,
}

impl ResourceBody for RecipeBody {
    type Resource = Recipe;
    const COLLECTION_PATH: &'static str = "/api/Recipes";

    fn payload_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_resource(self, id: EntityId) -> Recipe {
        Recipe::new(id, self.name, self.description, self.image_url)
    }

    fn from_resource(recipe: &Recipe) -> Self {
        Self {
            id: Some(recipe.id().to_string()),
            name: recipe.name().to_owned(),
            description: recipe.description().to_owned(),
            image_url: recipe.image_url().to_owned(),
        }
    }
}

/// Routes mounted under `/api/Recipes`.
pub fn scope() -> Scope {
    web::scope(RecipeBody::COLLECTION_PATH)
        .service(list_recipes)
        .service(create_recipe)
        .service(get_recipe)
        .service(replace_recipe)
        .service(patch_recipe)
        .service(delete_recipe)
}

#[utoipa::path(
    get,
    path = "/api/Recipes",
    responses(
        (status = 200, description = "Recipes", body = [RecipeBody]),
        (status = 404, description = "No recipes exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RecipeBody>>> {
    crud::fetch_all(state.recipes.as_ref()).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/Recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeBody>> {
    crud::fetch(state.recipes.as_ref(), &path)
        .await
        .map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/Recipes",
    request_body = RecipeBody,
    responses(
        (status = 201, description = "Recipe created", body = RecipeBody,
            headers(("Location" = String, description = "URL of the new recipe"))),
        (status = 400, description = "Invalid payload or duplicate name", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<HttpResponse> {
    crud::create(state.recipes.as_ref(), payload.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/Recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeBody,
    responses(
        (status = 204, description = "Recipe replaced"),
        (status = 400, description = "Invalid or mismatched payload", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
#[put("/{id}")]
pub async fn replace_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeBody>,
) -> ApiResult<HttpResponse> {
    crud::replace(state.recipes.as_ref(), &path, payload.into_inner()).await
}

#[utoipa::path(
    patch,
    path = "/api/Recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body(content = [PatchOperationBody], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Recipe patched"),
        (status = 400, description = "Invalid patch or resulting recipe", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "patchRecipe"
)]
#[patch("/{id}")]
pub async fn patch_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Vec<PatchOperationBody>>,
) -> ApiResult<HttpResponse> {
    crud::patch(state.recipes.as_ref(), &path, payload.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/Recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    crud::remove(state.recipes.as_ref(), &path).await
}
