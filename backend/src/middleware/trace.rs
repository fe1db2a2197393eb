//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside [`TraceId::scope`], so domain errors raised while
//! handling it pick the identifier up automatically. Callers may supply their
//! own identifier through the `trace-id` request header; anything that is not
//! a UUID is replaced with a fresh one.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware adding a `trace-id` header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pantry::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        debug!(
            %trace_id,
            method = %req.method(),
            path = req.path(),
            "handling request"
        );
        let header_value = trace_id.to_string();
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    use crate::domain::ApiResult;

    async fn call_with(
        request: test::TestRequest,
    ) -> (
        actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        String,
    ) {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route(
                    "/",
                    web::get().to(|| async move {
                        let id = TraceId::current().expect("trace id in scope");
                        HttpResponse::Ok().body(id.to_string())
                    }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async move {
                        ApiResult::<HttpResponse>::Err(crate::domain::Error::not_found("missing"))
                    }),
                ),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[actix_web::test]
    async fn exposes_trace_id_in_handler() {
        let (res, trace_id) = call_with(test::TestRequest::get().uri("/")).await;
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[actix_web::test]
    async fn honours_valid_inbound_trace_id() {
        let supplied = "6f1c2a1e-3c4d-4e5f-8a9b-0c1d2e3f4a5b";
        let (_, trace_id) = call_with(
            test::TestRequest::get()
                .uri("/")
                .insert_header((TRACE_ID_HEADER, supplied)),
        )
        .await;
        assert_eq!(trace_id, supplied);
    }

    #[actix_web::test]
    async fn replaces_malformed_inbound_trace_id() {
        let (_, trace_id) = call_with(
            test::TestRequest::get()
                .uri("/")
                .insert_header((TRACE_ID_HEADER, "not-a-uuid")),
        )
        .await;
        assert!(trace_id.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn propagates_trace_id_in_error() {
        let (res, trace_id) = call_with(test::TestRequest::get().uri("/fail")).await;
        let body: crate::domain::Error = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(trace_id.as_str()));
    }
}
