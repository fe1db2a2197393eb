//! Users API handlers.
//!
//! Users are plain records keyed by e-mail address. Passwords are stored and
//! returned exactly as supplied.

use actix_web::{HttpResponse, Scope, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EntityId, Resource, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::crud::{self, PatchOperationBody, ResourceBody, null_as_default};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// User as exchanged over HTTP.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"analytical"}`
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = User)]
pub struct UserBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = Uuid)]
    pub id: Option<String>,
    /// Unique address, compared case-insensitively.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

impl std::fmt::Debug for UserBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserBody")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ResourceBody for UserBody {
    type Resource = User;
    const COLLECTION_PATH: &'static str = "/api/Users";

    fn payload_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn into_resource(self, id: EntityId) -> User {
        User::new(id, self.email, self.password)
    }

    fn from_resource(user: &User) -> Self {
        Self {
            id: Some(user.id().to_string()),
            email: user.email().to_owned(),
            password: user.password().to_owned(),
        }
    }
}

/// Routes mounted under `/api/Users`.
pub fn scope() -> Scope {
    web::scope(UserBody::COLLECTION_PATH)
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(replace_user)
        .service(patch_user)
        .service(delete_user)
}

/// List every user ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/Users",
    responses(
        (status = 200, description = "Users", body = [UserBody]),
        (status = 404, description = "No users exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    crud::fetch_all(state.users.as_ref()).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/Users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserBody>> {
    crud::fetch(state.users.as_ref(), &path)
        .await
        .map(web::Json)
}

/// Register a user; the e-mail address must not be taken.
#[utoipa::path(
    post,
    path = "/api/Users",
    request_body = UserBody,
    responses(
        (status = 201, description = "User created", body = UserBody,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Invalid payload or duplicate e-mail", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    crud::create(state.users.as_ref(), payload.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/Users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserBody,
    responses(
        (status = 204, description = "User replaced"),
        (status = 400, description = "Invalid or mismatched payload", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/{id}")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserBody>,
) -> ApiResult<HttpResponse> {
    crud::replace(state.users.as_ref(), &path, payload.into_inner()).await
}

#[utoipa::path(
    patch,
    path = "/api/Users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body(content = [PatchOperationBody], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "User patched"),
        (status = 400, description = "Invalid patch or resulting user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/{id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Vec<PatchOperationBody>>,
) -> ApiResult<HttpResponse> {
    crud::patch(state.users.as_ref(), &path, payload.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/Users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    crud::remove(state.users.as_ref(), &path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{error_code, test_app};
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct Expectation<'a> {
        status: StatusCode,
        code: &'a str,
    }

    #[rstest]
    #[case(
        json!({"email": "", "password": "secret"}),
        Expectation { status: StatusCode::BAD_REQUEST, code: "validation_failed" }
    )]
    #[case(
        json!({"email": "ada@example.com", "password": null}),
        Expectation { status: StatusCode::BAD_REQUEST, code: "validation_failed" }
    )]
    #[case(
        json!({"email": "ADA@example.com", "password": "other"}),
        Expectation { status: StatusCode::BAD_REQUEST, code: "conflict" }
    )]
    #[actix_web::test]
    async fn create_rejects_invalid_users(
        #[case] payload: Value,
        #[case] expected: Expectation<'_>,
    ) {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let seeded = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Users")
                .set_json(json!({"email": "ada@example.com", "password": "analytical"}))
                .to_request(),
        )
        .await;
        assert_eq!(seeded.status(), StatusCode::CREATED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Users")
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected.status);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(error_code(&body), Some(expected.code));
    }

    #[actix_web::test]
    async fn location_points_at_users_collection() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let supplied = EntityId::random().to_string();
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Users")
                .set_json(json!({"id": supplied, "email": "bob@example.com", "password": "x"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("location header");
        let body: UserBody = actix_test::read_body_json(res).await;
        let id = body.id.expect("assigned id");
        assert_ne!(id, supplied);
        assert_eq!(location, format!("/api/Users/{id}"));
    }

    #[actix_web::test]
    async fn list_returns_created_user() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let created: UserBody = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Users")
                .set_json(json!({"email": "ada@example.com", "password": "analytical"}))
                .to_request(),
        )
        .await;

        let listed: Vec<UserBody> = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/Users").to_request(),
        )
        .await;

        assert_eq!(listed, vec![created]);
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let body = UserBody {
            id: None,
            email: "ada@example.com".to_owned(),
            password: "analytical".to_owned(),
        };
        assert!(!format!("{body:?}").contains("analytical"));
    }
}
