//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::Trace;
use crate::inbound::http::state::HttpState;

/// Build an application wired exactly like production routing, over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(super::configure)
}

/// Read the `code` member of an error body.
pub fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}
