use std::collections::HashSet;

use anyhow::Context;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde_json::Value;

use super::{
  TYPE_FIELD, discriminator_value, properties::PropertyRules, relations::RelationExtractor, type_mapper::TypeMapper,
  type_mapper::enum_values,
};
use crate::{
  config::Config,
  generator::{
    ast::{ModelDescriptor, PropertyDescriptor},
    document::{SchemaDocument, module_of},
    metrics::{GenerationStats, GenerationWarning},
    schema_node::primitive_type,
  },
};

const ATTRIBUTES_POINTER: &str = "/properties/attributes";

/// Turns filtered schema entries into [`ModelDescriptor`]s.
///
/// Skips are recorded on the stats; only type mapping failures abort the run.
pub(crate) struct ModelExtractor<'a> {
  document: &'a SchemaDocument,
  config: &'a Config,
  types: TypeMapper<'a>,
  rules: PropertyRules<'a>,
  relations: RelationExtractor<'a>,
}

impl<'a> ModelExtractor<'a> {
  pub(crate) fn new(document: &'a SchemaDocument, config: &'a Config) -> Self {
    Self {
      document,
      config,
      types: TypeMapper::new(config),
      rules: PropertyRules::new(config),
      relations: RelationExtractor::new(document),
    }
  }

  /// Extracts every model, restricted to `modules` when non-empty.
  ///
  /// Relations only survive when their target is itself a model of the document, whichever modules
  /// were requested.
  pub(crate) fn extract(
    &self,
    modules: &[String],
    stats: &mut GenerationStats,
  ) -> anyhow::Result<Vec<ModelDescriptor>> {
    let filter = self.config.model_filter()?;
    let candidates = self.candidate_names(filter);
    let mut seen = HashSet::new();
    let mut models = vec![];

    for (schema_name, schema) in self.document.schemas() {
      if !filter.is_match(schema_name) {
        stats.record_warning(GenerationWarning::FilteredOut {
          schema: schema_name.clone(),
        });
        continue;
      }

      let Some(module) = module_of(schema) else {
        stats.record_warning(GenerationWarning::MissingModule {
          schema: schema_name.clone(),
        });
        continue;
      };

      if !modules.is_empty() && !modules.iter().any(|requested| requested == module) {
        stats.record_warning(GenerationWarning::ModuleNotRequested {
          schema: schema_name.clone(),
          module: module.to_string(),
        });
        continue;
      }

      let Some((type_kind, type_value)) = type_discriminator(schema) else {
        stats.record_warning(GenerationWarning::MissingTypeDiscriminator {
          schema: schema_name.clone(),
        });
        continue;
      };

      let name = model_name(filter, schema_name);

      if !seen.insert((module.to_string(), name.clone())) {
        stats.record_warning(GenerationWarning::DuplicateModel {
          schema: schema_name.clone(),
          name,
          module: module.to_string(),
        });
        continue;
      }

      let mut model = self
        .model(name, schema, module, type_kind, type_value, stats)
        .with_context(|| format!("Failed to generate model for schema '{schema_name}'"))?;
      model.relations.retain(|relation| {
        let known = candidates.contains(relation.related_model_name.as_str());
        if !known {
          stats.record_warning(GenerationWarning::UnresolvedRelation {
            model: model.name.clone(),
            relation: relation.key.clone(),
          });
        }
        known
      });
      stats.record_model(&model);
      models.push(model);
    }

    Ok(models)
  }

  /// Names of every schema that would become a model, ignoring module selection.
  fn candidate_names(&self, filter: &Regex) -> HashSet<String> {
    self
      .document
      .schemas()
      .filter(|(schema_name, schema)| {
        filter.is_match(schema_name) && module_of(schema).is_some() && type_discriminator(schema).is_some()
      })
      .map(|(schema_name, _)| model_name(filter, schema_name))
      .collect()
  }

  fn model(
    &self,
    name: String,
    schema: &Value,
    module: &str,
    type_kind: &str,
    type_value: &str,
    stats: &mut GenerationStats,
  ) -> anyhow::Result<ModelDescriptor> {
    let attributes = schema
      .pointer(ATTRIBUTES_POINTER)
      .map(|attributes| self.document.deref(attributes))
      .transpose()?;

    let required: HashSet<&str> = attributes
      .and_then(|attributes| attributes.get("required"))
      .and_then(Value::as_array)
      .map(|required| required.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default();

    let mut properties: Vec<PropertyDescriptor> = vec![];
    let mut imports = IndexSet::new();
    let mut enums = IndexMap::new();

    let declared = attributes
      .and_then(|attributes| attributes.get("properties"))
      .and_then(Value::as_object);

    for (property_name, property) in declared.into_iter().flatten() {
      let in_module = module_of(property) == Some(module);

      if let Some(values) = enum_values(property) {
        if in_module || !self.config.enum_module_filter() {
          enums.insert(property_name.clone(), values);
        }
        continue;
      }

      if !in_module {
        continue;
      }

      let mapped = self
        .types
        .type_of(property)
        .with_context(|| format!("Can't map property '{property_name}' of model '{name}'"))?;

      if let Some(import) = &mapped.import {
        imports.insert(import.clone());
      }

      let is_required = required.contains(property_name.as_str());
      properties.push(self.rules.describe(property_name, property, mapped, is_required));
    }

    let relations = self.relations.extract(&name, schema, stats);

    Ok(
      ModelDescriptor::builder()
        .name(name)
        .module(module)
        .type_field(TYPE_FIELD)
        .type_kind(type_kind)
        .type_value(type_value)
        .properties(properties)
        .imports(imports)
        .relations(relations)
        .enums(enums)
        .build(),
    )
  }
}

/// The schema key with the filter stripped; a key that strips to nothing is kept whole.
fn model_name(filter: &Regex, schema_name: &str) -> String {
  match filter.replace_all(schema_name, "") {
    stripped if stripped.is_empty() => schema_name.to_string(),
    stripped => stripped.into_owned(),
  }
}

/// Declared type and value of the `type` discriminator, when both are present.
fn type_discriminator(schema: &Value) -> Option<(&str, &str)> {
  let type_property = schema.get("properties")?.get(TYPE_FIELD)?;
  let type_kind = primitive_type(type_property)?;
  let type_value = discriminator_value(schema)?;
  Some((type_kind, type_value))
}
