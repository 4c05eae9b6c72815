use serde_json::Value;

use super::discriminator_value;
use crate::generator::{
  ast::RelationDescriptor,
  document::SchemaDocument,
  errors::GenerationError,
  metrics::{GenerationStats, GenerationWarning},
  naming::related_model_name,
  schema_node::{SchemaNode, is_null_schema},
};

const RELATIONSHIPS_POINTER: &str = "/properties/relationships";
const DATA_POINTER: &str = "/properties/data";

/// Reads JSON:API style `relationships` into relation descriptors.
///
/// Relations whose target type can't be pinned down (polymorphic "morph" relations, dangling refs)
/// are skipped with a warning.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelationExtractor<'a> {
  document: &'a SchemaDocument,
}

impl<'a> RelationExtractor<'a> {
  pub(crate) fn new(document: &'a SchemaDocument) -> Self {
    Self { document }
  }

  pub(crate) fn extract(&self, model: &str, schema: &Value, stats: &mut GenerationStats) -> Vec<RelationDescriptor> {
    let Some(relationships) = schema.pointer(RELATIONSHIPS_POINTER) else {
      return vec![];
    };

    let relationships = match self.document.deref(relationships) {
      Ok(relationships) => relationships,
      Err(GenerationError::UnresolvedReference { pointer }) => {
        stats.record_warning(GenerationWarning::UnresolvedReference { pointer });
        return vec![];
      }
      Err(_) => return vec![],
    };

    let Some(entries) = relationships.get("properties").and_then(Value::as_object) else {
      return vec![];
    };

    entries
      .iter()
      .filter_map(|(key, relation)| match self.relation(key, relation) {
        Ok(Some(descriptor)) => Some(descriptor),
        Ok(None) | Err(_) => {
          stats.record_warning(GenerationWarning::UnresolvedRelation {
            model: model.to_string(),
            relation: key.clone(),
          });
          None
        }
      })
      .collect()
  }

  fn relation(&self, key: &str, relation: &Value) -> Result<Option<RelationDescriptor>, GenerationError> {
    let relation = self.document.deref(relation)?;
    let Some(data) = relation.pointer(DATA_POINTER) else {
      return Ok(None);
    };
    let data = self.unwrap_nullable(data)?;

    let (is_to_many, target) = match SchemaNode::of(data) {
      SchemaNode::ArrayOf(items) => (true, self.unwrap_nullable(items)?),
      _ => (false, data),
    };

    Ok(discriminator_value(target).map(|type_value| {
      RelationDescriptor::builder()
        .key(key)
        .is_to_many(is_to_many)
        .related_model_name(related_model_name(type_value))
        .build()
    }))
  }

  /// Follows `$ref` and strips a nullable `anyOf` wrapper.
  fn unwrap_nullable<'v>(&self, node: &'v Value) -> Result<&'v Value, GenerationError>
  where
    'a: 'v,
  {
    let node = self.document.deref(node)?;
    match SchemaNode::of(node) {
      SchemaNode::AnyOf(members) => match members.iter().find(|member| !is_null_schema(member)) {
        Some(member) => self.document.deref(member),
        None => Ok(node),
      },
      _ => Ok(node),
    }
  }
}
