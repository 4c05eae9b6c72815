use serde_json::json;

use crate::{
  generator::{
    ast::ResponseShape,
    converter::OperationMapBuilder,
    document::SchemaDocument,
    metrics::{GenerationStats, GenerationWarning},
  },
  tests::common::users_document,
};

#[test]
fn test_module_operations_in_document_order() {
  let document = users_document();
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("users", &mut stats);

  let summary: Vec<_> = operations
    .iter()
    .map(|operation| {
      (
        operation.operation_id.as_str(),
        operation.http_method.as_str(),
        operation.path.as_str(),
        operation.response_shape,
      )
    })
    .collect();

  assert_eq!(
    summary,
    [
      ("getUser", "GET", "/users/{id}", ResponseShape::Resource),
      ("listUsers", "GET", "/users", ResponseShape::Collection),
      ("createUser", "POST", "/users", ResponseShape::Collection),
    ]
  );
  assert_eq!(stats.operations_mapped, 3);
}

#[test]
fn test_skipped_operations_are_reported() {
  let document = users_document();
  let mut stats = GenerationStats::default();
  OperationMapBuilder::new(&document).build("users", &mut stats);

  assert!(stats.warnings.contains(&GenerationWarning::InvalidOperationId {
    method: "DELETE".to_string(),
    path: "/users/{id}".to_string(),
    operation_id: "users.delete".to_string(),
  }));
  assert!(stats.warnings.contains(&GenerationWarning::OperationNotInModule {
    method: "GET".to_string(),
    path: "/teams".to_string(),
    module: "users".to_string(),
  }));
  assert!(stats.warnings.contains(&GenerationWarning::UnknownResponseShape {
    operation_id: "createUser".to_string(),
    method: "POST".to_string(),
    path: "/users".to_string(),
  }));
}

#[test]
fn test_shared_operation_appears_in_each_module() {
  let document = users_document();
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("admin", &mut stats);

  assert_eq!(operations.len(), 1);
  assert_eq!(operations[0].operation_id, "createUser");
}

#[test]
fn test_duplicate_operation_id_keeps_first() {
  let document = SchemaDocument::new(json!({
    "paths": {
      "/a": { "get": { "operationId": "fetch", "x-modules": ["core"], "responses": {} } },
      "/b": { "get": { "operationId": "fetch", "x-modules": ["core"], "responses": {} } }
    }
  }));
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("core", &mut stats);

  assert_eq!(operations.len(), 1);
  assert_eq!(operations[0].path, "/a");
  assert!(stats.warnings.contains(&GenerationWarning::DuplicateOperationId {
    operation_id: "fetch".to_string(),
    module: "core".to_string(),
  }));
}

#[test]
fn test_missing_operation_id_is_skipped() {
  let document = SchemaDocument::new(json!({
    "paths": {
      "/ping": { "get": { "x-modules": ["core"], "responses": {} } },
      "/status": { "get": { "operationId": "health:check", "x-modules": ["core"], "responses": {} } }
    }
  }));
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("core", &mut stats);

  assert!(operations.is_empty());
  assert_eq!(stats.skipped_count(), 2);
}

#[test]
fn test_unresolved_response_falls_back_to_collection() {
  let document = SchemaDocument::new(json!({
    "paths": {
      "/gone": {
        "get": {
          "operationId": "gone",
          "x-modules": ["core"],
          "responses": { "200": { "$ref": "#/components/responses/Missing" } }
        }
      }
    }
  }));
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("core", &mut stats);

  assert_eq!(operations[0].response_shape, ResponseShape::Collection);
  assert!(stats.warnings.contains(&GenerationWarning::UnresolvedReference {
    pointer: "#/components/responses/Missing".to_string(),
  }));
}

#[test]
fn test_only_first_response_is_classified() {
  let document = SchemaDocument::new(json!({
    "paths": {
      "/report": {
        "get": {
          "operationId": "report",
          "x-modules": ["core"],
          "responses": {
            "200": { "content": { "application/json": { "schema": { "type": "object" } } } },
            "206": { "content": { "application/json": { "schema": { "type": "array", "items": {} } } } }
          }
        }
      }
    }
  }));
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("core", &mut stats);

  assert_eq!(operations[0].response_shape, ResponseShape::Resource);
  assert!(stats.warnings.is_empty());
}

#[test]
fn test_swagger2_responses() {
  let document = SchemaDocument::new(json!({
    "swagger": "2.0",
    "paths": {
      "/pets": {
        "get": {
          "operationId": "listPets",
          "x-modules": ["pets"],
          "responses": { "200": { "schema": { "type": "array", "items": {} } } }
        }
      }
    }
  }));
  let mut stats = GenerationStats::default();
  let operations = OperationMapBuilder::new(&document).build("pets", &mut stats);

  assert_eq!(operations[0].response_shape, ResponseShape::Collection);
}
