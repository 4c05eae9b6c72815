use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::generator::{
  codegen::{IndexFile, WritePolicy},
  orchestrator::GenerationOutput,
};

/// What a write pass did, as paths relative to the output root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
  pub written: Vec<PathBuf>,
  /// Create-only files left alone because they already existed.
  pub preserved: Vec<PathBuf>,
  pub indexes: Vec<PathBuf>,
}

/// Persists planned files under an output root.
pub struct OutputWriter<'a> {
  root: &'a Path,
}

impl<'a> OutputWriter<'a> {
  pub fn new(root: &'a Path) -> Self {
    Self { root }
  }

  pub async fn write(&self, output: &GenerationOutput) -> anyhow::Result<WriteReport> {
    let mut report = WriteReport::default();

    for file in &output.files {
      let target = self.root.join(file.path());
      if file.policy == WritePolicy::CreateOnly && tokio::fs::try_exists(&target).await? {
        report.preserved.push(file.path().to_path_buf());
        continue;
      }
      write_file(&target, &file.contents).await?;
      report.written.push(file.path().to_path_buf());
    }

    for index in &output.indexes {
      let siblings = self.siblings(index).await?;
      if index.entries().next().is_none() && siblings.is_empty() {
        continue;
      }
      write_file(&self.root.join(index.path()), &index.render(siblings)).await?;
      report.indexes.push(index.path());
    }

    Ok(report)
  }

  /// Files already in the index's directory, so a partial run keeps earlier exports.
  async fn siblings(&self, index: &IndexFile) -> anyhow::Result<Vec<String>> {
    let directory = self.root.join(index.directory());
    if !tokio::fs::try_exists(&directory).await? {
      return Ok(vec![]);
    }

    let mut stems = vec![];
    let mut entries = tokio::fs::read_dir(&directory)
      .await
      .with_context(|| format!("Failed to list {}", directory.display()))?;
    while let Some(entry) = entries.next_entry().await? {
      if !entry.file_type().await?.is_file() {
        continue;
      }
      if let Some(stem) = entry.file_name().to_str().and_then(|name| index.stem_of(name)) {
        stems.push(stem);
      }
    }
    Ok(stems)
  }
}

async fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, contents)
    .await
    .with_context(|| format!("Failed to write {}", path.display()))
}
