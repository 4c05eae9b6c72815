//! Run configuration.
//!
//! A [`Config`] is loaded once, never mutated, and handed by reference to every generator component.

pub mod file;
pub mod stubs;

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use strum::{AsRefStr, Display};

pub use file::{ConfigFile, RefType};
pub use stubs::{StubKind, Stubs};

use crate::generator::errors::GenerationError;

pub const DEFAULT_CONFIG: &str = include_str!("../../config/oas3-tsgen.toml");

const PACKAGE_JSON: &str = "package.json";
const DEFAULT_INDEX_FILENAME: &str = "index.ts";

const MODELS_FILTER_KEY: &str = "models";
const MODELS_TEMPLATE_KEY: &str = "models_template";
const OPERATION_MAP_TEMPLATE_KEY: &str = "operation_map_template";
const INDEX_KEY: &str = "index";

/// Generated file families, keyed by their `[output_structure]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
  BaseModels,
  Models,
  ModelTranslations,
  OperationMaps,
}

/// Primitive and `$ref` lookup tables for property typing.
#[derive(Debug, Clone, Default)]
pub struct TypeDictionary {
  pub primitives: IndexMap<String, String>,
  pub refs: IndexMap<String, RefType>,
}

#[derive(Debug, Clone)]
pub struct Config {
  alias: String,
  output_structure: IndexMap<String, String>,
  filenames: IndexMap<String, String>,
  model_filter: Option<Regex>,
  types: TypeDictionary,
  generic_defaults: IndexMap<String, String>,
  non_nullable: IndexSet<String>,
  enum_module_filter: bool,
  stubs: Stubs,
}

impl Config {
  pub fn new(file: ConfigFile, alias: impl Into<String>, stubs: Stubs) -> anyhow::Result<Self> {
    let output_structure = file
      .output_structure
      .into_iter()
      .map(|(kind, path)| (kind, normalize_directory(path)))
      .collect();

    let model_filter = file
      .filter_regex
      .get(MODELS_FILTER_KEY)
      .map(String::as_str)
      .map(compile_filter)
      .transpose()?;

    let non_nullable = match file.types.non_nullable {
      Some(types) => types.into_iter().collect(),
      None => file.types.defaults.keys().cloned().collect(),
    };

    Ok(Self {
      alias: alias.into(),
      output_structure,
      filenames: file.filename,
      model_filter,
      types: TypeDictionary {
        primitives: file.types.primitives,
        refs: file.types.refs,
      },
      generic_defaults: file.types.defaults,
      non_nullable,
      enum_module_filter: file.enums.module_filter,
      stubs,
    })
  }

  /// Parses TOML and builds a config with built-in stubs.
  #[cfg(test)]
  pub fn from_toml(content: &str, alias: impl Into<String>) -> anyhow::Result<Self> {
    Self::new(ConfigFile::from_toml(content)?, alias, Stubs::builtin())
  }

  /// Loads the config file (or the bundled default), stub overrides and the import alias.
  pub async fn load(path: Option<&Path>, output_root: &Path) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => ConfigFile::from_toml(&tokio::fs::read_to_string(path).await?)?,
      None => ConfigFile::from_toml(DEFAULT_CONFIG)?,
    };

    let stubs = match &file.stubs_dir {
      Some(dir) => {
        let dir = match path.and_then(Path::parent) {
          Some(base) if dir.is_relative() => base.join(dir),
          _ => dir.clone(),
        };
        Stubs::load_overrides(&dir).await?
      }
      None => Stubs::builtin(),
    };

    let alias = match &file.alias {
      Some(alias) if !alias.is_empty() => alias.clone(),
      _ => read_package_alias(output_root).await?,
    };

    Self::new(file, alias, stubs)
  }

  pub fn alias(&self) -> &str {
    &self.alias
  }

  /// Directory for an artifact kind, relative to the output root and ending with `/`.
  pub fn output_structure(&self, kind: ArtifactKind) -> anyhow::Result<&str> {
    self
      .output_structure
      .get(kind.as_ref())
      .map(String::as_str)
      .ok_or_else(|| missing("output_structure", kind.as_ref()).into())
  }

  pub fn models_filename(&self, entity: &str) -> anyhow::Result<String> {
    Ok(self.filename(MODELS_TEMPLATE_KEY)?.replace("{entity}", entity))
  }

  pub fn operation_map_filename(&self, module: &str) -> anyhow::Result<String> {
    Ok(self.filename(OPERATION_MAP_TEMPLATE_KEY)?.replace("{module}", module))
  }

  pub fn index_filename(&self) -> &str {
    self.filenames.get(INDEX_KEY).map_or(DEFAULT_INDEX_FILENAME, String::as_str)
  }

  pub fn model_filter(&self) -> anyhow::Result<&Regex> {
    self
      .model_filter
      .as_ref()
      .ok_or_else(|| missing("filter_regex", MODELS_FILTER_KEY).into())
  }

  pub fn types(&self) -> &TypeDictionary {
    &self.types
  }

  pub fn generic_default(&self, resolved_type: &str) -> Option<&str> {
    self.generic_defaults.get(resolved_type).map(String::as_str)
  }

  pub fn is_non_nullable(&self, resolved_type: &str) -> bool {
    self.non_nullable.contains(resolved_type)
  }

  pub fn enum_module_filter(&self) -> bool {
    self.enum_module_filter
  }

  pub fn stubs(&self) -> &Stubs {
    &self.stubs
  }

  fn filename(&self, key: &str) -> anyhow::Result<&str> {
    self
      .filenames
      .get(key)
      .map(String::as_str)
      .ok_or_else(|| missing("filename", key).into())
  }
}

fn missing(section: &'static str, key: &str) -> GenerationError {
  GenerationError::MissingConfigEntry {
    section,
    key: key.to_string(),
  }
}

fn normalize_directory(mut path: String) -> String {
  if !path.ends_with('/') {
    path.push('/');
  }
  path
}

/// Compiles a filter, accepting PCRE-style `/pattern/flags` delimiters.
fn compile_filter(pattern: &str) -> Result<Regex, GenerationError> {
  let source = match pattern.strip_prefix('/').and_then(|rest| rest.rsplit_once('/')) {
    Some((body, flags)) if flags.chars().all(|flag| flag.is_ascii_alphabetic()) => {
      if flags.is_empty() {
        body.to_string()
      } else {
        format!("(?{flags}){body}")
      }
    }
    _ => pattern.to_string(),
  };

  Regex::new(&source).map_err(|source| GenerationError::InvalidFilterRegex {
    pattern: pattern.to_string(),
    source,
  })
}

async fn read_package_alias(output_root: &Path) -> anyhow::Result<String> {
  let path = output_root.join(PACKAGE_JSON);
  let missing_alias = || GenerationError::MissingAlias {
    path: path.display().to_string(),
  };

  if !tokio::fs::try_exists(&path).await? {
    return Err(missing_alias().into());
  }

  let package: serde_json::Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?;
  package
    .pointer("/config/alias")
    .and_then(serde_json::Value::as_str)
    .filter(|alias| !alias.is_empty())
    .map(String::from)
    .ok_or_else(|| missing_alias().into())
}
