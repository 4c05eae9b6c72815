use serde_json::Value;

use crate::{
  config::{Config, TypeDictionary},
  generator::{
    document::reference_name,
    errors::GenerationError,
    schema_node::{SchemaNode, is_null_schema},
  },
};

/// Output type for a schema node plus the import it needs, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MappedType {
  pub(crate) type_name: String,
  pub(crate) import: Option<String>,
}

impl MappedType {
  fn plain(type_name: impl Into<String>) -> Self {
    Self {
      type_name: type_name.into(),
      import: None,
    }
  }
}

/// Maps schema nodes to output types through the configured dictionaries.
///
/// Every miss is fatal: a property typed by guesswork would compile into a wrong model.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeMapper<'a> {
  types: &'a TypeDictionary,
}

impl<'a> TypeMapper<'a> {
  pub(crate) fn new(config: &'a Config) -> Self {
    Self { types: config.types() }
  }

  pub(crate) fn type_of(&self, node: &Value) -> Result<MappedType, GenerationError> {
    match SchemaNode::of(node) {
      SchemaNode::Enum {
        primitive: Some(primitive),
        ..
      }
      | SchemaNode::Primitive(primitive) => self.primitive(primitive),
      SchemaNode::ArrayOf(items) => {
        let item = self.type_of(items)?;
        Ok(MappedType {
          type_name: format!("{}[]", item.type_name),
          import: item.import,
        })
      }
      SchemaNode::Reference(pointer) => self.reference(pointer),
      SchemaNode::AnyOf(members) => members
        .iter()
        .find(|member| !is_null_schema(member))
        .ok_or_else(|| GenerationError::undetermined(node))
        .and_then(|member| self.type_of(member)),
      SchemaNode::AllOf([member]) => self.type_of(member),
      SchemaNode::Enum { primitive: None, .. } | SchemaNode::AllOf(_) | SchemaNode::Undetermined => {
        Err(GenerationError::undetermined(node))
      }
    }
  }

  fn primitive(&self, primitive: &str) -> Result<MappedType, GenerationError> {
    self
      .types
      .primitives
      .get(primitive)
      .map(MappedType::plain)
      .ok_or_else(|| GenerationError::UnknownPrimitiveType {
        type_name: primitive.to_string(),
      })
  }

  fn reference(&self, pointer: &str) -> Result<MappedType, GenerationError> {
    let name = reference_name(pointer);
    self
      .types
      .refs
      .get(name)
      .map(|ref_type| MappedType {
        type_name: ref_type.type_name.clone(),
        import: Some(ref_type.import.clone()),
      })
      .ok_or_else(|| GenerationError::UnknownReferenceType { name: name.to_string() })
  }
}

/// Values of an enum-valued node, routed to translation labels instead of typing.
pub(crate) fn enum_values(node: &Value) -> Option<Vec<String>> {
  match SchemaNode::of(node) {
    SchemaNode::Enum { values, .. } => Some(values.iter().map(enum_value).collect()),
    _ => None,
  }
}

fn enum_value(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(value) => value.clone(),
    other => other.to_string(),
  }
}
