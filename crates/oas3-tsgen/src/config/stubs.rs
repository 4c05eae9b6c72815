use std::{collections::HashMap, path::Path};

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::generator::errors::GenerationError;

/// Text templates the emitter fills in. Each has a built-in default; a file with the same relative
/// path under the configured `stubs_dir` replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum StubKind {
  #[strum(serialize = "model/base_model.stub")]
  BaseModel,
  #[strum(serialize = "model/model_property.stub")]
  ModelProperty,
  #[strum(serialize = "model/model.stub")]
  Model,
  #[strum(serialize = "model/relation.stub")]
  Relation,
  #[strum(serialize = "model/relation_import.stub")]
  RelationImport,
  #[strum(serialize = "model/model_translations.stub")]
  Translations,
  #[strum(serialize = "model/translation_attribute.stub")]
  TranslationAttribute,
  #[strum(serialize = "model/translation_attribute_element.stub")]
  TranslationAttributeElement,
  #[strum(serialize = "operation_map/operation_map.stub")]
  OperationMap,
  #[strum(serialize = "operation_map/operation_map_item.stub")]
  OperationMapItem,
  #[strum(serialize = "index/export.stub")]
  IndexExport,
  #[strum(serialize = "index/operation_map_export.stub")]
  OperationMapIndexExport,
  #[strum(serialize = "index/operation_map_entry.stub")]
  OperationMapIndexEntry,
  #[strum(serialize = "index/operation_map_aggregate.stub")]
  OperationMapIndexAggregate,
  #[strum(serialize = "index/translation_export.stub")]
  TranslationIndexExport,
  #[strum(serialize = "index/translation_entry.stub")]
  TranslationIndexEntry,
  #[strum(serialize = "index/translation_aggregate.stub")]
  TranslationIndexAggregate,
}

impl StubKind {
  pub fn relative_path(self) -> &'static str {
    self.into()
  }

  const fn builtin(self) -> &'static str {
    match self {
      Self::BaseModel => include_str!("../../stubs/model/base_model.stub"),
      Self::ModelProperty => include_str!("../../stubs/model/model_property.stub"),
      Self::Model => include_str!("../../stubs/model/model.stub"),
      Self::Relation => include_str!("../../stubs/model/relation.stub"),
      Self::RelationImport => include_str!("../../stubs/model/relation_import.stub"),
      Self::Translations => include_str!("../../stubs/model/model_translations.stub"),
      Self::TranslationAttribute => include_str!("../../stubs/model/translation_attribute.stub"),
      Self::TranslationAttributeElement => include_str!("../../stubs/model/translation_attribute_element.stub"),
      Self::OperationMap => include_str!("../../stubs/operation_map/operation_map.stub"),
      Self::OperationMapItem => include_str!("../../stubs/operation_map/operation_map_item.stub"),
      Self::IndexExport => include_str!("../../stubs/index/export.stub"),
      Self::OperationMapIndexExport => include_str!("../../stubs/index/operation_map_export.stub"),
      Self::OperationMapIndexEntry => include_str!("../../stubs/index/operation_map_entry.stub"),
      Self::OperationMapIndexAggregate => include_str!("../../stubs/index/operation_map_aggregate.stub"),
      Self::TranslationIndexExport => include_str!("../../stubs/index/translation_export.stub"),
      Self::TranslationIndexEntry => include_str!("../../stubs/index/translation_entry.stub"),
      Self::TranslationIndexAggregate => include_str!("../../stubs/index/translation_aggregate.stub"),
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct Stubs {
  overrides: HashMap<StubKind, String>,
}

impl Stubs {
  pub fn builtin() -> Self {
    Self::default()
  }

  /// Reads every stub present under `dir`; missing files keep the built-in text, a missing `dir` is fatal.
  pub async fn load_overrides(dir: &Path) -> anyhow::Result<Self> {
    let is_dir = tokio::fs::metadata(dir).await.is_ok_and(|metadata| metadata.is_dir());
    if !is_dir {
      return Err(
        GenerationError::MissingStubsDir {
          path: dir.display().to_string(),
        }
        .into(),
      );
    }

    let mut overrides = HashMap::new();
    for kind in StubKind::iter() {
      let path = dir.join(kind.relative_path());
      if tokio::fs::try_exists(&path).await? {
        overrides.insert(kind, tokio::fs::read_to_string(&path).await?);
      }
    }
    Ok(Self { overrides })
  }

  #[cfg(test)]
  #[must_use]
  pub fn with_override(mut self, kind: StubKind, content: impl Into<String>) -> Self {
    self.overrides.insert(kind, content.into());
    self
  }

  pub fn get(&self, kind: StubKind) -> &str {
    self.overrides.get(&kind).map_or_else(|| kind.builtin(), String::as_str)
  }
}
