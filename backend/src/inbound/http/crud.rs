//! Resource-agnostic request handling shared by the CRUD endpoints.
//!
//! Each resource module declares its wire body, implements [`ResourceBody`]
//! for it and delegates to the helpers here, keeping the per-resource
//! handlers down to routing and OpenAPI metadata.

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::ResourceCrud;
use crate::domain::{
    ApiResult, EntityId, Error, PatchDocument, PatchOperation, Resource,
};
use crate::inbound::http::validation::{FieldName, id_mismatch_error, parse_entity_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Wire representation of a resource.
pub trait ResourceBody: Serialize + Sized {
    type Resource: Resource;

    /// Path prefix of the collection, used for `Location` headers.
    const COLLECTION_PATH: &'static str;

    /// Identifier carried in the body, if any.
    fn payload_id(&self) -> Option<&str>;

    /// Convert the body into a domain resource with the given identifier.
    fn into_resource(self, id: EntityId) -> Self::Resource;

    /// Render a domain resource.
    fn from_resource(resource: &Self::Resource) -> Self;
}

/// Deserialise `null` as the type's default, matching a missing member.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One JSON Patch operation as sent by clients.
///
/// Example JSON:
/// `{"op":"replace","path":"/kcal","value":80}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PatchOperationBody {
    /// One of `add`, `remove`, `replace`, `copy`, `move` or `test`.
    #[schema(example = "replace")]
    pub op: String,
    /// Target field as `/<field>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/kcal")]
    pub path: Option<String>,
    /// New or expected value; `null` is kept distinct from absent.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    /// Source field for `copy` and `move`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

fn patch_document(operations: Vec<PatchOperationBody>) -> Result<PatchDocument, Error> {
    PatchDocument::try_from_operations(operations.into_iter().map(|body| {
        PatchOperation::from_parts(&body.op, body.path, body.value, body.from)
    }))
    .map_err(Error::validation_failed)
}

fn body_id<B: ResourceBody>(body: &B) -> Result<EntityId, Error> {
    let name = <B::Resource as Resource>::NAME;
    body.payload_id()
        .and_then(|raw| EntityId::parse(raw).ok())
        .ok_or_else(|| id_mismatch_error(name))
}

pub(crate) async fn fetch<B: ResourceBody>(
    port: &dyn ResourceCrud<B::Resource>,
    raw_id: &str,
) -> ApiResult<B> {
    let id = parse_entity_id(raw_id, ID_FIELD)?;
    let resource = port.get(&id).await?;
    Ok(B::from_resource(&resource))
}

pub(crate) async fn fetch_all<B: ResourceBody>(
    port: &dyn ResourceCrud<B::Resource>,
) -> ApiResult<Vec<B>> {
    let resources = port.list().await?;
    Ok(resources.iter().map(B::from_resource).collect())
}

pub(crate) async fn create<B: ResourceBody>(
    port: &dyn ResourceCrud<B::Resource>,
    body: B,
) -> ApiResult<HttpResponse> {
    if body.payload_id().is_some() {
        debug!(
            resource = <B::Resource as Resource>::NAME,
            "discarding client-supplied id on create"
        );
    }
    let created = port.create(body.into_resource(EntityId::nil())).await?;
    let location = format!("{}/{}", B::COLLECTION_PATH, created.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(B::from_resource(&created)))
}

pub(crate) async fn replace<B: ResourceBody>(
    port: &dyn ResourceCrud<B::Resource>,
    raw_id: &str,
    body: B,
) -> ApiResult<HttpResponse> {
    let id = parse_entity_id(raw_id, ID_FIELD)?;
    let payload_id = body_id(&body)?;
    port.replace(&id, body.into_resource(payload_id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub(crate) async fn patch<R: Resource>(
    port: &dyn ResourceCrud<R>,
    raw_id: &str,
    operations: Vec<PatchOperationBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_entity_id(raw_id, ID_FIELD)?;
    let document = patch_document(operations)?;
    port.partial_update(&id, &document).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub(crate) async fn remove<R: Resource>(
    port: &dyn ResourceCrud<R>,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let id = parse_entity_id(raw_id, ID_FIELD)?;
    port.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn explicit_null_value_is_kept() {
        let body: PatchOperationBody =
            serde_json::from_value(json!({"op": "replace", "path": "/kcal", "value": null}))
                .expect("valid body");
        assert_eq!(body.value, Some(Value::Null));

        let absent: PatchOperationBody =
            serde_json::from_value(json!({"op": "remove", "path": "/kcal"})).expect("valid body");
        assert_eq!(absent.value, None);
    }

    #[rstest]
    fn malformed_operations_fail_validation() {
        let error = patch_document(vec![PatchOperationBody {
            op: "replace".to_owned(),
            path: Some("/name".to_owned()),
            value: None,
            from: None,
        }])
        .expect_err("value is required");

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
    }
}
