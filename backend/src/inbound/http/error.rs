//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into consistent JSON responses and status
//! codes. Body extraction failures are routed through the same shape via
//! [`json_error_handler`] and [`path_error_handler`].

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict | ErrorCode::ValidationFailed => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

/// Turn an unreadable or missing JSON body into an `invalid_request` error.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected request body");
    Error::invalid_request("request body is missing or is not valid JSON")
        .with_details(json!({
            "code": "invalid_body",
            "reason": err.to_string(),
        }))
        .into()
}

/// Turn an undecodable path segment into an `invalid_request` error.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected request path");
    Error::invalid_request("request path is malformed")
        .with_details(json!({ "code": "invalid_path" }))
        .into()
}
