//! Stub-driven rendering of descriptors into output files.
//!
//! Nothing here touches the filesystem: emitters return [`GeneratedFile`]s and [`IndexFile`]s for the
//! writer to persist.

pub(crate) mod index;
pub(crate) mod models;
pub(crate) mod operations;
pub(crate) mod stub;

use std::path::{Path, PathBuf};

pub use self::index::IndexFile;
pub(crate) use self::{models::ModelEmitter, operations::OperationMapEmitter};
use crate::config::ArtifactKind;

/// How the writer treats a file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
  /// Fully generated; always regenerated.
  Overwrite,
  /// Partly hand-owned; written only when absent.
  CreateOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  pub kind: ArtifactKind,
  /// Relative to the output root.
  pub path: PathBuf,
  pub contents: String,
  pub policy: WritePolicy,
}

impl GeneratedFile {
  pub fn file_name(&self) -> Option<&str> {
    self.path.file_name().and_then(|name| name.to_str())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

/// File name without its last extension, e.g. `UserModel` for `UserModel.ts`.
pub(crate) fn file_stem(file_name: &str) -> &str {
  file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}
