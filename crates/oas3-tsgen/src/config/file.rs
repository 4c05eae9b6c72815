use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// On-disk shape of the TOML configuration.
///
/// Every section is optional at parse time; required entries are checked when a component asks for
/// them, so a config that only serves operation maps need not describe models.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
  pub alias: Option<String>,
  #[serde(default)]
  pub output_structure: IndexMap<String, String>,
  #[serde(default)]
  pub filename: IndexMap<String, String>,
  #[serde(default)]
  pub filter_regex: IndexMap<String, String>,
  #[serde(default)]
  pub types: TypesSection,
  #[serde(default)]
  pub enums: EnumsSection,
  pub stubs_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypesSection {
  #[serde(default)]
  pub primitives: IndexMap<String, String>,
  #[serde(default)]
  pub refs: IndexMap<String, RefType>,
  #[serde(default)]
  pub defaults: IndexMap<String, String>,
  pub non_nullable: Option<Vec<String>>,
}

/// Output type and import line for a `$ref` target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefType {
  #[serde(rename = "type")]
  pub type_name: String,
  pub import: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EnumsSection {
  /// Apply the owning model's `x-module` check to enum-valued properties too.
  #[serde(default)]
  pub module_filter: bool,
}

impl ConfigFile {
  pub fn from_toml(content: &str) -> anyhow::Result<Self> {
    Ok(toml::from_str(content)?)
  }
}
