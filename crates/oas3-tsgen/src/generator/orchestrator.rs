//! Orchestration for the schema document to TypeScript generation pipeline.
//!
//! The orchestrator wires extraction and emission together and hands back everything a run would
//! write, without touching the filesystem.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_tsgen::{config::Config, generator::{document::SchemaDocument, orchestrator::Orchestrator}};
//!
//! # fn example(document: SchemaDocument, config: Config) -> anyhow::Result<()> {
//! let orchestrator = Orchestrator::new(&document, &config);
//! let output = orchestrator.generate_models(&[])?;
//!
//! println!("Planned {} files with {} warnings", output.files.len(), output.stats.warnings.len());
//! # Ok(())
//! # }
//! ```

use super::{
  codegen::{GeneratedFile, IndexFile, ModelEmitter, OperationMapEmitter},
  converter::{ModelExtractor, OperationMapBuilder},
  document::SchemaDocument,
  metrics::GenerationStats,
};
use crate::config::{ArtifactKind, Config};

/// Files, indexes and statistics of one generation pass.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
  pub files: Vec<GeneratedFile>,
  pub indexes: Vec<IndexFile>,
  pub stats: GenerationStats,
}

/// Runs either generation pass over a loaded document with one configuration.
pub struct Orchestrator<'a> {
  document: &'a SchemaDocument,
  config: &'a Config,
}

impl<'a> Orchestrator<'a> {
  pub fn new(document: &'a SchemaDocument, config: &'a Config) -> Self {
    Self { document, config }
  }

  /// Base model, model and translation files for every extracted model, plus one index per directory.
  ///
  /// `modules` restricts extraction to those modules; empty means all.
  ///
  /// # Errors
  ///
  /// Fails on a missing config entry or a property type that can't be mapped.
  pub fn generate_models(&self, modules: &[String]) -> anyhow::Result<GenerationOutput> {
    let mut stats = GenerationStats::default();
    let models = ModelExtractor::new(self.document, self.config).extract(modules, &mut stats)?;

    let emitter = ModelEmitter::new(self.config);
    let mut indexes = [
      ArtifactKind::BaseModels,
      ArtifactKind::Models,
      ArtifactKind::ModelTranslations,
    ]
    .into_iter()
    .map(|kind| IndexFile::new(kind, self.config))
    .collect::<anyhow::Result<Vec<_>>>()?;

    let mut files = vec![];
    for model in &models {
      for file in emitter.emit(model)? {
        register(&mut indexes, &file);
        files.push(file);
      }
    }

    Ok(GenerationOutput { files, indexes, stats })
  }

  /// One operation map per module, plus the aggregating index.
  ///
  /// `modules` defaults to every module named in an operation's `x-modules`.
  ///
  /// # Errors
  ///
  /// Fails on a missing config entry.
  pub fn generate_operation_maps(&self, modules: &[String]) -> anyhow::Result<GenerationOutput> {
    let modules = if modules.is_empty() {
      self.document.operation_modules()
    } else {
      modules.to_vec()
    };

    let mut stats = GenerationStats::default();
    let builder = OperationMapBuilder::new(self.document);
    let emitter = OperationMapEmitter::new(self.config);
    let mut indexes = vec![IndexFile::new(ArtifactKind::OperationMaps, self.config)?];

    let mut files = vec![];
    for module in &modules {
      let operations = builder.build(module, &mut stats);
      let file = emitter.emit(module, &operations)?;
      stats.record_module();
      register(&mut indexes, &file);
      files.push(file);
    }

    Ok(GenerationOutput { files, indexes, stats })
  }
}

fn register(indexes: &mut [IndexFile], file: &GeneratedFile) {
  let Some(file_name) = file.file_name() else {
    return;
  };
  if let Some(index) = indexes.iter_mut().find(|index| index.kind() == file.kind) {
    index.add(file_name);
  }
}
