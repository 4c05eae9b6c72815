use indexmap::IndexSet;

use super::{GeneratedFile, WritePolicy, file_stem, stub::render};
use crate::{
  config::{ArtifactKind, Config, StubKind},
  generator::{
    ast::{ModelDescriptor, PropertyDescriptor, RelationDescriptor},
    naming::{enum_value_title, to_type_name},
  },
};

const NULLABLE_SUFFIX: &str = " | null";
const TO_MANY_CARDINALITY: &str = "[]";
const HAS_MANY: &str = "hasMany";
const HAS_ONE: &str = "hasOne";

/// Renders the three artifacts of a model: base, subclass and translations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ModelEmitter<'a> {
  config: &'a Config,
}

impl<'a> ModelEmitter<'a> {
  pub(crate) fn new(config: &'a Config) -> Self {
    Self { config }
  }

  pub(crate) fn emit(&self, model: &ModelDescriptor) -> anyhow::Result<Vec<GeneratedFile>> {
    let file_name = self.config.models_filename(&model.name)?;

    Ok(vec![
      self.file(ArtifactKind::BaseModels, &file_name, self.base_model(model), WritePolicy::Overwrite)?,
      self.file(
        ArtifactKind::Models,
        &file_name,
        self.model(model, file_stem(&file_name))?,
        WritePolicy::CreateOnly,
      )?,
      self.file(
        ArtifactKind::ModelTranslations,
        &file_name,
        self.translations(model),
        WritePolicy::CreateOnly,
      )?,
    ])
  }

  fn file(
    &self,
    kind: ArtifactKind,
    file_name: &str,
    contents: String,
    policy: WritePolicy,
  ) -> anyhow::Result<GeneratedFile> {
    Ok(GeneratedFile {
      kind,
      path: format!("{}{file_name}", self.config.output_structure(kind)?).into(),
      contents,
      policy,
    })
  }

  fn base_model(&self, model: &ModelDescriptor) -> String {
    let imports: String = model.imports.iter().map(|import| format!("{import}\n")).collect();
    let properties: String = model.properties.iter().map(|property| self.property(property)).collect();

    render(
      self.stub(StubKind::BaseModel),
      &[
        ("{additionalImport}", imports.as_str()),
        ("{modelName}", model.name.as_str()),
        ("{modelType}", model.type_kind.as_str()),
        ("{modelTypeValue}", model.type_value.as_str()),
        ("{properties}", properties.as_str()),
      ],
    )
  }

  fn property(&self, property: &PropertyDescriptor) -> String {
    let nullable = if property.is_nullable { NULLABLE_SUFFIX } else { "" };
    let default = property
      .default_literal
      .as_ref()
      .map(|literal| format!(" = {literal}"))
      .unwrap_or_default();

    render(
      self.stub(StubKind::ModelProperty),
      &[
        ("{name}", property.name.as_str()),
        ("{type}", property.resolved_type.as_str()),
        ("{nullable}", nullable),
        ("{default}", default.as_str()),
      ],
    )
  }

  /// `file` is the stem shared by the model's files, which import each other by it.
  fn model(&self, model: &ModelDescriptor, file: &str) -> anyhow::Result<String> {
    let base_path = self.config.output_structure(ArtifactKind::BaseModels)?;

    let related: IndexSet<&str> = model
      .relations
      .iter()
      .map(|relation| relation.related_model_name.as_str())
      .filter(|related| *related != model.name)
      .collect();
    let relation_imports = related
      .iter()
      .map(|related| {
        let related_file = self.config.models_filename(related)?;
        Ok(render(
          self.stub(StubKind::RelationImport),
          &[("{relatedModel}", *related), ("{file}", file_stem(&related_file))],
        ))
      })
      .collect::<anyhow::Result<String>>()?;

    let relations: String = model.relations.iter().map(|relation| self.relation(relation)).collect();

    Ok(render(
      self.stub(StubKind::Model),
      &[
        ("{alias}", self.config.alias()),
        ("{path}", base_path),
        ("{file}", file),
        ("{modelName}", model.name.as_str()),
        ("{relationImports}", relation_imports.as_str()),
        ("{relations}", relations.trim_end()),
      ],
    ))
  }

  fn relation(&self, relation: &RelationDescriptor) -> String {
    let (kind, cardinality) = if relation.is_to_many {
      (HAS_MANY, TO_MANY_CARDINALITY)
    } else {
      (HAS_ONE, NULLABLE_SUFFIX)
    };

    render(
      self.stub(StubKind::Relation),
      &[
        ("{relation}", to_type_name(&relation.key).as_str()),
        ("{relationKey}", relation.key.as_str()),
        ("{relatedModel}", relation.related_model_name.as_str()),
        ("{relationKind}", kind),
        ("{relationCardinality}", cardinality),
      ],
    )
  }

  fn translations(&self, model: &ModelDescriptor) -> String {
    let attributes: String = model
      .enums
      .iter()
      .map(|(attribute, values)| {
        let elements: String = values
          .iter()
          .filter(|value| !value.is_empty())
          .map(|value| {
            render(
              self.stub(StubKind::TranslationAttributeElement),
              &[("{value}", value.as_str()), ("{title}", enum_value_title(value).as_str())],
            )
          })
          .collect();

        render(
          self.stub(StubKind::TranslationAttribute),
          &[("{attributeTitle}", attribute.as_str()), ("{attributeElements}", elements.trim_end())],
        )
      })
      .collect();

    render(
      self.stub(StubKind::Translations),
      &[("{translations}", attributes.trim_end())],
    )
  }

  fn stub(&self, kind: StubKind) -> &'a str {
    self.config.stubs().get(kind)
  }
}
