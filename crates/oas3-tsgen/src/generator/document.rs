use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::errors::GenerationError;

pub(crate) const MODULE_EXTENSION: &str = "x-module";
pub(crate) const MODULES_EXTENSION: &str = "x-modules";

pub(crate) const HTTP_METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// A decoded OpenAPI 3 / Swagger 2 document.
///
/// The tree is kept untyped because the documents this tool consumes mix both dialects and rely on
/// `x-` extensions that typed models drop.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
  root: Value,
}

impl SchemaDocument {
  pub fn new(root: Value) -> Self {
    Self { root }
  }

  #[cfg(test)]
  pub fn root(&self) -> &Value {
    &self.root
  }

  /// Named schemas from `components.schemas`, falling back to Swagger 2 `definitions`.
  pub fn schemas(&self) -> impl Iterator<Item = (&String, &Value)> {
    self
      .root
      .pointer("/components/schemas")
      .or_else(|| self.root.get("definitions"))
      .and_then(Value::as_object)
      .into_iter()
      .flat_map(Map::iter)
  }

  pub fn paths(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.root.get("paths").and_then(Value::as_object).into_iter().flat_map(Map::iter)
  }

  /// Walks a `#/a/b/c` pointer from the document root.
  ///
  /// Segments are matched as literal keys after JSON pointer unescaping (`~1` → `/`, `~0` → `~`).
  pub fn resolve(&self, pointer: &str) -> Result<&Value, GenerationError> {
    let path = pointer.trim_start_matches('#').trim_matches('/');
    if path.is_empty() {
      return Ok(&self.root);
    }

    path
      .split('/')
      .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
      .try_fold(&self.root, |node, segment| match node {
        Value::Object(map) => map.get(&segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
      })
      .ok_or_else(|| GenerationError::UnresolvedReference {
        pointer: pointer.to_string(),
      })
  }

  /// Follows a node's `$ref`, if any, returning the node itself otherwise.
  pub fn deref<'a>(&'a self, node: &'a Value) -> Result<&'a Value, GenerationError> {
    match reference_of(node) {
      Some(pointer) => self.resolve(pointer),
      None => Ok(node),
    }
  }

  /// Every operation as `(path, method, operation)` in document order.
  ///
  /// Only HTTP method keys holding an object count; `parameters`, `servers` and extensions are skipped.
  pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
    self
      .paths()
      .filter_map(|(path, item)| item.as_object().map(|item| (path, item)))
      .flat_map(|(path, item)| {
        item
          .iter()
          .filter(|(method, operation)| is_http_method(method) && operation.is_object())
          .map(move |(method, operation)| (path.as_str(), method.as_str(), operation))
      })
  }

  /// Every module named in any operation's `x-modules`, sorted and deduplicated.
  pub fn operation_modules(&self) -> Vec<String> {
    let modules: BTreeSet<String> = self
      .operations()
      .flat_map(|(_, _, operation)| operation_modules(operation))
      .map(String::from)
      .collect();
    modules.into_iter().collect()
  }
}

/// Modules an operation is tagged with through `x-modules`.
pub(crate) fn operation_modules(operation: &Value) -> impl Iterator<Item = &str> {
  operation
    .get(MODULES_EXTENSION)
    .and_then(Value::as_array)
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
}

fn is_http_method(key: &str) -> bool {
  HTTP_METHODS.iter().any(|method| method.eq_ignore_ascii_case(key))
}

pub(crate) fn reference_of(node: &Value) -> Option<&str> {
  node.get("$ref").and_then(Value::as_str)
}

/// Trailing segment of a reference, e.g. `Date` for `#/components/schemas/Date`.
pub(crate) fn reference_name(pointer: &str) -> &str {
  pointer.rsplit('/').next().unwrap_or(pointer)
}

pub(crate) fn module_of(node: &Value) -> Option<&str> {
  node.get(MODULE_EXTENSION).and_then(Value::as_str).filter(|module| !module.is_empty())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn document() -> SchemaDocument {
    SchemaDocument::new(json!({
      "paths": {
        "/users": { "get": { "x-modules": ["users", "admin"] } },
        "/orders": { "post": { "x-modules": ["billing", "users"] }, "parameters": [] }
      },
      "components": {
        "schemas": {
          "UserResource": { "type": "object" },
          "a/b": { "type": "string" }
        },
        "responses": {
          "UserCollection": { "content": {} }
        }
      }
    }))
  }

  #[test]
  fn test_resolve_walks_segments() {
    let doc = document();
    let node = doc.resolve("#/components/schemas/UserResource").unwrap();
    assert_eq!(node, &json!({ "type": "object" }));
  }

  #[test]
  fn test_resolve_unescapes_segments() {
    let doc = document();
    let node = doc.resolve("#/components/schemas/a~1b").unwrap();
    assert_eq!(node["type"], "string");
  }

  #[test]
  fn test_resolve_missing_segment_fails() {
    let doc = document();
    let err = doc.resolve("#/components/schemas/Missing").unwrap_err();
    assert!(matches!(
      err,
      GenerationError::UnresolvedReference { ref pointer } if pointer == "#/components/schemas/Missing"
    ));
  }

  #[test]
  fn test_schemas_falls_back_to_definitions() {
    let doc = SchemaDocument::new(json!({ "definitions": { "Pet": {}, "Owner": {} } }));
    let names: Vec<_> = doc.schemas().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Pet", "Owner"]);
  }

  #[test]
  fn test_operation_modules_sorted_and_deduplicated() {
    assert_eq!(document().operation_modules(), vec!["admin", "billing", "users"]);
  }

  #[test]
  fn test_operations_skip_non_method_keys() {
    let doc = document();
    let operations: Vec<_> = doc.operations().map(|(path, method, _)| (path, method)).collect();
    assert_eq!(operations, [("/users", "get"), ("/orders", "post")]);
  }

  #[test]
  fn test_reference_name_takes_last_segment() {
    assert_eq!(reference_name("#/components/schemas/Date"), "Date");
    assert_eq!(reference_name("Date"), "Date");
  }
}
