use serde_json::Value;

use super::type_mapper::MappedType;
use crate::{config::Config, generator::ast::PropertyDescriptor};

const NULL_LITERAL: &str = "null";

/// Initializer and nullability rules for typed model properties.
///
/// 1. an explicit schema `default` is rendered as a literal;
/// 2. an optional property whose type has a configured generic default gets that default;
/// 3. any other optional property is nullable and starts as `null`;
/// 4. a required property without a default gets no initializer.
///
/// Types listed as non-nullable never take `| null`, even when optional.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PropertyRules<'a> {
  config: &'a Config,
}

impl<'a> PropertyRules<'a> {
  pub(crate) fn new(config: &'a Config) -> Self {
    Self { config }
  }

  pub(crate) fn describe(
    &self,
    name: &str,
    schema: &Value,
    mapped: MappedType,
    is_required: bool,
  ) -> PropertyDescriptor {
    let is_nullable = !is_required && !self.config.is_non_nullable(&mapped.type_name);

    let default_literal = match schema.get("default") {
      Some(value) => Some(render_literal(value)),
      None if is_required => None,
      None => self
        .config
        .generic_default(&mapped.type_name)
        .map(String::from)
        .or_else(|| is_nullable.then(|| NULL_LITERAL.to_string())),
    };

    PropertyDescriptor::builder()
      .name(name)
      .resolved_type(mapped.type_name)
      .maybe_required_import(mapped.import)
      .is_required(is_required)
      .is_nullable(is_nullable)
      .maybe_default_literal(default_literal)
      .build()
  }
}

/// Renders a JSON default as a source literal; strings are single-quoted.
pub(crate) fn render_literal(value: &Value) -> String {
  match value {
    Value::String(text) => format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'")),
    Value::Null => NULL_LITERAL.to_string(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn config() -> Config {
    Config::from_toml(
      r#"
        [types.defaults]
        string = "''"
        boolean = "false"
      "#,
      "app",
    )
    .unwrap()
  }

  fn mapped(type_name: &str) -> MappedType {
    MappedType {
      type_name: type_name.to_string(),
      import: None,
    }
  }

  #[test]
  fn test_explicit_default_wins() {
    let config = config();
    let rules = PropertyRules::new(&config);
    let property = rules.describe("status", &json!({ "default": "draft" }), mapped("string"), true);
    assert_eq!(property.default_literal.as_deref(), Some("'draft'"));

    let property = rules.describe("count", &json!({ "default": 3 }), mapped("number"), false);
    assert_eq!(property.default_literal.as_deref(), Some("3"));
    assert!(property.is_nullable);
  }

  #[test]
  fn test_optional_property_uses_generic_default() {
    let config = config();
    let property = PropertyRules::new(&config).describe("title", &json!({}), mapped("string"), false);
    assert_eq!(property.default_literal.as_deref(), Some("''"));
    assert!(!property.is_nullable);
  }

  #[test]
  fn test_optional_property_without_generic_default_is_null() {
    let config = config();
    let property = PropertyRules::new(&config).describe("age", &json!({}), mapped("number"), false);
    assert_eq!(property.default_literal.as_deref(), Some("null"));
    assert!(property.is_nullable);
  }

  #[test]
  fn test_required_property_has_no_initializer() {
    let config = config();
    let property = PropertyRules::new(&config).describe("name", &json!({}), mapped("string"), true);
    assert!(property.default_literal.is_none());
    assert!(!property.is_nullable);
    assert!(property.is_required);
  }

  #[test]
  fn test_render_literal_escapes_quotes() {
    assert_eq!(render_literal(&json!("it's")), r"'it\'s'");
    assert_eq!(render_literal(&json!(true)), "true");
    assert_eq!(render_literal(&json!(null)), "null");
    assert_eq!(render_literal(&json!([1, 2])), "[1,2]");
  }
}
