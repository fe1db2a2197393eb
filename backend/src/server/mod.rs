//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};

use pantry::Trace;
#[cfg(debug_assertions)]
use pantry::doc::ApiDoc;
use pantry::inbound::http::configure;
use pantry::inbound::http::health::{HealthState, live, ready};
use pantry::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind an Actix HTTP server over the configured storage.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness
/// is left to the caller.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server = HttpServer::new(move || build_app(health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    fn app_parts() -> (web::Data<HealthState>, web::Data<HttpState>) {
        (
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::in_memory()),
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn trailing_slash_is_ignored() {
        let (health, state) = app_parts();
        let app = actix_test::init_service(build_app(health, state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/Products/")
                .set_json(json!({"name": "Eggs", "kcal": 70}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state() {
        let (health, state) = app_parts();
        let app = actix_test::init_service(build_app(health.clone(), state)).await;

        let before = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn responses_carry_trace_id() {
        let (health, state) = app_parts();
        let app = actix_test::init_service(build_app(health, state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/Users").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key(pantry::domain::TRACE_ID_HEADER));
    }
}
