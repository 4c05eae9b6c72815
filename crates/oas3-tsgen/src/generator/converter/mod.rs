pub(crate) mod models;
pub(crate) mod operations;
mod properties;
mod relations;
pub(crate) mod response_shape;
pub(crate) mod type_mapper;

use serde_json::Value;

pub(crate) use self::{models::ModelExtractor, operations::OperationMapBuilder};

pub(crate) const TYPE_FIELD: &str = "type";

/// The discriminator value a schema advertises for its `type` property.
///
/// Checked in order: `properties.type.default`, `properties.type.example`, a single-valued
/// `properties.type.enum`, then a schema-level `example.type`.
pub(crate) fn discriminator_value(schema: &Value) -> Option<&str> {
  let type_property = schema.get("properties").and_then(|properties| properties.get(TYPE_FIELD));

  let declared = type_property.and_then(|property| {
    property
      .get("default")
      .or_else(|| property.get("example"))
      .or_else(|| match property.get("enum").and_then(Value::as_array) {
        Some(values) if values.len() == 1 => values.first(),
        _ => None,
      })
  });

  declared
    .or_else(|| schema.get("example").and_then(|example| example.get(TYPE_FIELD)))
    .and_then(Value::as_str)
    .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests;
