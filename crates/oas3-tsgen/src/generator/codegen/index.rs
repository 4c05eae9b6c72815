use std::{collections::BTreeSet, path::PathBuf};

use super::stub::render;
use crate::{
  config::{ArtifactKind, Config, StubKind},
  generator::naming::to_symbol_name,
};

/// Per-file line plus the optional block that gathers every file into one export.
#[derive(Debug, Clone)]
struct IndexTemplates {
  export: String,
  aggregate: Option<(String, String)>,
}

impl IndexTemplates {
  fn for_kind(kind: ArtifactKind, config: &Config) -> Self {
    let stubs = config.stubs();
    let stub = |kind: StubKind| stubs.get(kind).to_string();

    match kind {
      ArtifactKind::BaseModels | ArtifactKind::Models => Self {
        export: stub(StubKind::IndexExport),
        aggregate: None,
      },
      ArtifactKind::ModelTranslations => Self {
        export: stub(StubKind::TranslationIndexExport),
        aggregate: Some((
          stub(StubKind::TranslationIndexEntry),
          stub(StubKind::TranslationIndexAggregate),
        )),
      },
      ArtifactKind::OperationMaps => Self {
        export: stub(StubKind::OperationMapIndexExport),
        aggregate: Some((
          stub(StubKind::OperationMapIndexEntry),
          stub(StubKind::OperationMapIndexAggregate),
        )),
      },
    }
  }
}

/// Index of one output directory, accumulated while its artifact kind is emitted.
///
/// Entries are file stems; rendering merges them with any siblings already on disk and sorts the
/// lot, so the index never depends on emission order or on which modules a run selected.
#[derive(Debug, Clone)]
pub struct IndexFile {
  kind: ArtifactKind,
  directory: String,
  file_name: String,
  alias: String,
  templates: IndexTemplates,
  entries: BTreeSet<String>,
}

impl IndexFile {
  pub(crate) fn new(kind: ArtifactKind, config: &Config) -> anyhow::Result<Self> {
    Ok(Self {
      kind,
      directory: config.output_structure(kind)?.to_string(),
      file_name: config.index_filename().to_string(),
      alias: config.alias().to_string(),
      templates: IndexTemplates::for_kind(kind, config),
      entries: BTreeSet::new(),
    })
  }

  pub fn kind(&self) -> ArtifactKind {
    self.kind
  }

  /// Directory relative to the output root, ending with `/`.
  pub fn directory(&self) -> &str {
    &self.directory
  }

  pub fn path(&self) -> PathBuf {
    PathBuf::from(&self.directory).join(&self.file_name)
  }

  pub fn entries(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(String::as_str)
  }

  /// Records a generated sibling by file name.
  pub(crate) fn add(&mut self, file_name: &str) {
    if let Some(stem) = self.stem_of(file_name) {
      self.entries.insert(stem);
    }
  }

  /// Stem of a sibling the index should list: same extension as the index, and not the index itself.
  pub fn stem_of(&self, file_name: &str) -> Option<String> {
    if file_name == self.file_name {
      return None;
    }
    let extension = self.file_name.rfind('.').map_or("", |dot| &self.file_name[dot..]);
    file_name
      .strip_suffix(extension)
      .filter(|stem| !stem.is_empty() && !stem.starts_with('.'))
      .map(String::from)
  }

  /// Renders the index over the recorded entries plus `siblings`.
  pub fn render(&self, siblings: impl IntoIterator<Item = String>) -> String {
    let mut stems = self.entries.clone();
    stems.extend(siblings);

    let mut lines = String::new();
    let mut aggregated = String::new();

    for stem in &stems {
      let symbol = to_symbol_name(stem);
      let values = [
        ("{alias}", self.alias.as_str()),
        ("{path}", self.directory.as_str()),
        ("{file}", stem.as_str()),
        ("{symbol}", symbol.as_str()),
      ];

      lines.push_str(&render(&self.templates.export, &values));
      if let Some((entry, _)) = &self.templates.aggregate {
        aggregated.push_str(&render(entry, &values));
      }
    }

    if let Some((_, block)) = &self.templates.aggregate {
      lines.push_str(&render(block, &[("{entries}", aggregated.as_str())]));
    }

    lines
  }
}
