use serde_json::Value;

use crate::generator::{
  ast::ResponseShape,
  document::{SchemaDocument, reference_of},
  errors::GenerationError,
  schema_node::SchemaNode,
};

const JSON_SCHEMA_POINTER: &str = "/content/application~1json/schema";
const RESOURCE_SUFFIX: &str = "Resource";
const COLLECTION_SUFFIX: &str = "Collection";
const OBJECT_TYPE: &str = "object";
const MAX_REF_DEPTH: usize = 16;

/// Decides whether a response carries a single resource or a collection.
///
/// `anyOf` payloads are deliberately left `Unknown` even when every member agrees; callers fall back
/// to `Collection` and report it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResponseShapeClassifier<'a> {
  document: &'a SchemaDocument,
}

impl<'a> ResponseShapeClassifier<'a> {
  pub(crate) fn new(document: &'a SchemaDocument) -> Self {
    Self { document }
  }

  /// Classifies a response object or a `$ref` to one.
  ///
  /// Fails only when a reference can't be resolved.
  pub(crate) fn classify(&self, response: &Value) -> Result<ResponseShape, GenerationError> {
    self.classify_response(response, 0)
  }

  fn classify_response(&self, response: &Value, depth: usize) -> Result<ResponseShape, GenerationError> {
    if let Some(pointer) = reference_of(response) {
      return self.classify_target(pointer, depth);
    }

    match response_schema(response) {
      Some(schema) => self.classify_schema(schema, depth),
      None => Ok(ResponseShape::Unknown),
    }
  }

  /// A `$ref` may name a response component or a schema; which one is decided by its content.
  fn classify_target(&self, pointer: &str, depth: usize) -> Result<ResponseShape, GenerationError> {
    if depth >= MAX_REF_DEPTH {
      return Ok(ResponseShape::Unknown);
    }

    let target = self.document.resolve(pointer)?;
    if target.get("content").is_some() || target.get("schema").is_some() || reference_of(target).is_some() {
      self.classify_response(target, depth + 1)
    } else {
      self.classify_schema(target, depth + 1)
    }
  }

  fn classify_schema(&self, schema: &Value, depth: usize) -> Result<ResponseShape, GenerationError> {
    match SchemaNode::of(schema) {
      SchemaNode::Primitive(primitive)
      | SchemaNode::Enum {
        primitive: Some(primitive),
        ..
      } => Ok(shape_of_type(primitive)),
      SchemaNode::ArrayOf(_) => Ok(ResponseShape::Collection),
      SchemaNode::AnyOf(_) => Ok(ResponseShape::Unknown),
      SchemaNode::AllOf(members) => match members.last() {
        Some(envelope) => self.classify_envelope(envelope, depth),
        None => Ok(ResponseShape::Unknown),
      },
      SchemaNode::Reference(pointer) => self.classify_target(pointer, depth),
      SchemaNode::Enum { primitive: None, .. } | SchemaNode::Undetermined => Ok(ResponseShape::Unknown),
    }
  }

  /// The payload envelope is the last `allOf` member; its `data` property decides the shape.
  fn classify_envelope(&self, envelope: &Value, depth: usize) -> Result<ResponseShape, GenerationError> {
    let envelope = match reference_of(envelope) {
      Some(pointer) if depth < MAX_REF_DEPTH => self.document.resolve(pointer)?,
      _ => envelope,
    };

    let Some(data) = envelope.pointer("/properties/data") else {
      return Ok(ResponseShape::Unknown);
    };

    if let Some(primitive) = data.get("type").and_then(Value::as_str) {
      return Ok(shape_of_type(primitive));
    }

    Ok(match reference_of(data) {
      Some(pointer) if pointer.ends_with(RESOURCE_SUFFIX) => ResponseShape::Resource,
      Some(pointer) if pointer.ends_with(COLLECTION_SUFFIX) => ResponseShape::Collection,
      _ => ResponseShape::Unknown,
    })
  }
}

/// JSON payload schema of a literal response, OpenAPI 3 `content` first, then Swagger 2 `schema`.
fn response_schema(response: &Value) -> Option<&Value> {
  response.pointer(JSON_SCHEMA_POINTER).or_else(|| response.get("schema"))
}

fn shape_of_type(primitive: &str) -> ResponseShape {
  if primitive == OBJECT_TYPE {
    ResponseShape::Resource
  } else {
    ResponseShape::Collection
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn classify(document: &SchemaDocument, response: &Value) -> ResponseShape {
    ResponseShapeClassifier::new(document).classify(response).unwrap()
  }

  fn json_response(schema: Value) -> Value {
    json!({ "content": { "application/json": { "schema": schema } } })
  }

  #[test]
  fn test_direct_type_decides_shape() {
    let doc = SchemaDocument::new(json!({}));
    assert_eq!(
      classify(&doc, &json_response(json!({ "type": "object" }))),
      ResponseShape::Resource
    );
    assert_eq!(
      classify(&doc, &json_response(json!({ "type": "array" }))),
      ResponseShape::Collection
    );
  }

  #[test]
  fn test_all_of_last_member_data_reference() {
    let doc = SchemaDocument::new(json!({}));
    let resource = json_response(json!({
      "allOf": [
        { "$ref": "#/components/schemas/Envelope" },
        { "properties": { "data": { "$ref": "#/components/schemas/UserResource" } } }
      ]
    }));
    let collection = json_response(json!({
      "allOf": [
        { "$ref": "#/components/schemas/Envelope" },
        { "properties": { "data": { "$ref": "#/components/schemas/UserCollection" } } }
      ]
    }));
    assert_eq!(classify(&doc, &resource), ResponseShape::Resource);
    assert_eq!(classify(&doc, &collection), ResponseShape::Collection);
  }

  #[test]
  fn test_all_of_only_inspects_last_member() {
    let doc = SchemaDocument::new(json!({}));
    let response = json_response(json!({
      "allOf": [
        { "properties": { "data": { "type": "object" } } },
        { "properties": { "meta": { "type": "object" } } }
      ]
    }));
    assert_eq!(classify(&doc, &response), ResponseShape::Unknown);
  }

  #[test]
  fn test_all_of_data_type() {
    let doc = SchemaDocument::new(json!({}));
    let response = json_response(json!({
      "allOf": [{ "properties": { "data": { "type": "array", "items": {} } } }]
    }));
    assert_eq!(classify(&doc, &response), ResponseShape::Collection);
  }

  #[test]
  fn test_any_of_is_unknown() {
    let doc = SchemaDocument::new(json!({}));
    let response = json_response(json!({ "anyOf": [{ "type": "object" }, { "type": "object" }] }));
    assert_eq!(classify(&doc, &response), ResponseShape::Unknown);
  }

  #[test]
  fn test_references_are_followed() {
    let doc = SchemaDocument::new(json!({
      "components": {
        "responses": {
          "UserResponse": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } } }
        },
        "schemas": { "User": { "type": "object" } }
      }
    }));
    assert_eq!(
      classify(&doc, &json!({ "$ref": "#/components/responses/UserResponse" })),
      ResponseShape::Resource
    );
    assert_eq!(
      classify(&doc, &json_response(json!({ "$ref": "#/components/schemas/User" }))),
      ResponseShape::Resource
    );
  }

  #[test]
  fn test_swagger2_schema() {
    let doc = SchemaDocument::new(json!({}));
    assert_eq!(
      classify(&doc, &json!({ "schema": { "type": "array", "items": {} } })),
      ResponseShape::Collection
    );
  }

  #[test]
  fn test_unresolved_reference_fails() {
    let doc = SchemaDocument::new(json!({}));
    let result = ResponseShapeClassifier::new(&doc).classify(&json!({ "$ref": "#/components/responses/Gone" }));
    assert!(matches!(result, Err(GenerationError::UnresolvedReference { .. })));
  }

  #[test]
  fn test_reference_cycle_is_unknown() {
    let doc = SchemaDocument::new(json!({
      "components": { "schemas": { "Loop": { "$ref": "#/components/schemas/Loop" } } }
    }));
    assert_eq!(
      classify(&doc, &json_response(json!({ "$ref": "#/components/schemas/Loop" }))),
      ResponseShape::Unknown
    );
  }

  #[test]
  fn test_missing_payload_is_unknown() {
    let doc = SchemaDocument::new(json!({}));
    assert_eq!(classify(&doc, &json!({ "description": "No content" })), ResponseShape::Unknown);
  }
}
