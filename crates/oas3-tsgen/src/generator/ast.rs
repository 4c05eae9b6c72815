//! Normalized descriptors built from the schema document and consumed by the emitter.

use indexmap::{IndexMap, IndexSet};
use strum::Display;

/// A generated entity, one per filtered schema entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct ModelDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub module: String,
  #[builder(into)]
  pub type_field: String,
  /// Declared type of the discriminator property, e.g. `string`.
  #[builder(into)]
  pub type_kind: String,
  #[builder(into)]
  pub type_value: String,
  #[builder(default)]
  pub properties: Vec<PropertyDescriptor>,
  #[builder(default)]
  pub imports: IndexSet<String>,
  #[builder(default)]
  pub relations: Vec<RelationDescriptor>,
  /// Enum-valued property name to its values, in document order.
  #[builder(default)]
  pub enums: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct PropertyDescriptor {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub resolved_type: String,
  pub required_import: Option<String>,
  #[builder(default)]
  pub is_required: bool,
  #[builder(default)]
  pub is_nullable: bool,
  /// Rendered initializer; `None` means the caller must supply the value.
  pub default_literal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct RelationDescriptor {
  #[builder(into)]
  pub key: String,
  #[builder(default)]
  pub is_to_many: bool,
  #[builder(into)]
  pub related_model_name: String,
}

/// Payload shape of an operation's response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResponseShape {
  Resource,
  Collection,
  #[default]
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct OperationDescriptor {
  #[builder(into)]
  pub operation_id: String,
  #[builder(into)]
  pub path: String,
  /// Upper-cased HTTP method.
  #[builder(into)]
  pub http_method: String,
  pub response_shape: ResponseShape,
}
