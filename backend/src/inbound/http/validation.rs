//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EntityId, EntityIdError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    IdMismatch,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::IdMismatch => "id_mismatch",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn id_mismatch_error(resource: &str) -> Error {
    ValidationError::new(
        "id",
        format!("{resource} id in the body does not match the path"),
    )
    .with_code(ErrorCode::IdMismatch)
}

/// Parse an identifier taken from the path or body.
pub(crate) fn parse_entity_id(value: &str, field: FieldName) -> Result<EntityId, Error> {
    EntityId::parse(value).map_err(|err| match err {
        EntityIdError::Empty => missing_field_error(field),
        EntityIdError::Invalid => invalid_uuid_error(field, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    fn parses_canonical_uuid() {
        let id = parse_entity_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", ID).expect("valid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("", "missing_field")]
    #[case("   ", "missing_field")]
    #[case("not-a-uuid", "invalid_uuid")]
    fn rejects_bad_identifiers(#[case] raw: &str, #[case] code: &str) {
        let err = parse_entity_id(raw, ID).expect_err("invalid id");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "id");
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn id_mismatch_names_the_resource() {
        let err = id_mismatch_error("recipe");
        assert_eq!(err.message(), "recipe id in the body does not match the path");
        assert_eq!(err.details().expect("details")["code"], "id_mismatch");
    }
}
