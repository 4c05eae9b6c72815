use serde_json::Value;

use super::document::reference_of;

const NULL_TYPE: &str = "null";

/// Shape of a schema node, decided by which keyword it carries.
///
/// Precedence is `enum`, `type`, `$ref`, `anyOf`, `allOf`: enumerated values must be seen before the
/// `type` that usually accompanies them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SchemaNode<'a> {
  Enum {
    values: &'a [Value],
    primitive: Option<&'a str>,
  },
  Primitive(&'a str),
  ArrayOf(&'a Value),
  Reference(&'a str),
  AnyOf(&'a [Value]),
  AllOf(&'a [Value]),
  Undetermined,
}

impl<'a> SchemaNode<'a> {
  pub(crate) fn of(node: &'a Value) -> Self {
    if let Some(values) = node.get("enum").and_then(Value::as_array) {
      return Self::Enum {
        values,
        primitive: primitive_type(node),
      };
    }

    if let Some(primitive) = primitive_type(node) {
      return match node.get("items") {
        Some(items) if primitive == "array" => Self::ArrayOf(items),
        _ => Self::Primitive(primitive),
      };
    }

    if let Some(pointer) = reference_of(node) {
      return Self::Reference(pointer);
    }

    if let Some(members) = node.get("anyOf").and_then(Value::as_array) {
      return Self::AnyOf(members);
    }

    if let Some(members) = node.get("allOf").and_then(Value::as_array) {
      return Self::AllOf(members);
    }

    Self::Undetermined
  }
}

/// The declared `type`, taking the first non-`null` entry of a type array.
pub(crate) fn primitive_type(node: &Value) -> Option<&str> {
  match node.get("type")? {
    Value::String(primitive) => Some(primitive.as_str()),
    Value::Array(types) => types.iter().filter_map(Value::as_str).find(|primitive| *primitive != NULL_TYPE),
    _ => None,
  }
}

pub(crate) fn is_null_schema(node: &Value) -> bool {
  node.as_str() == Some(NULL_TYPE) || node.get("type").and_then(Value::as_str) == Some(NULL_TYPE)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_enum_takes_precedence_over_type() {
    let node = json!({ "type": "string", "enum": ["a", "b"] });
    assert!(matches!(
      SchemaNode::of(&node),
      SchemaNode::Enum {
        primitive: Some("string"),
        ..
      }
    ));
  }

  #[test]
  fn test_array_with_items() {
    let node = json!({ "type": "array", "items": { "type": "string" } });
    assert_eq!(SchemaNode::of(&node), SchemaNode::ArrayOf(&json!({ "type": "string" })));
  }

  #[test]
  fn test_array_without_items_is_primitive() {
    let node = json!({ "type": "array" });
    assert_eq!(SchemaNode::of(&node), SchemaNode::Primitive("array"));
  }

  #[test]
  fn test_type_array_skips_null() {
    let node = json!({ "type": ["null", "integer"] });
    assert_eq!(SchemaNode::of(&node), SchemaNode::Primitive("integer"));
  }

  #[test]
  fn test_reference_and_compositions() {
    assert_eq!(
      SchemaNode::of(&json!({ "$ref": "#/components/schemas/Date" })),
      SchemaNode::Reference("#/components/schemas/Date")
    );
    assert!(matches!(SchemaNode::of(&json!({ "anyOf": [] })), SchemaNode::AnyOf(_)));
    assert!(matches!(SchemaNode::of(&json!({ "allOf": [] })), SchemaNode::AllOf(_)));
    assert_eq!(SchemaNode::of(&json!({ "description": "?" })), SchemaNode::Undetermined);
  }
}
