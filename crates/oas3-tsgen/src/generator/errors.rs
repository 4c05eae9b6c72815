use thiserror::Error;

/// Conditions that abort a generation run.
///
/// Anything recoverable is recorded as a [`GenerationWarning`](super::metrics::GenerationWarning)
/// instead; these errors mean continuing would emit unsound sources.
#[derive(Debug, Error)]
pub enum GenerationError {
  #[error("can't resolve reference '{pointer}'")]
  UnresolvedReference { pointer: String },

  #[error("undefined property type '{type_name}', please check the [types.primitives] config")]
  UnknownPrimitiveType { type_name: String },

  #[error("undefined $ref '{name}', please check the [types.refs] config")]
  UnknownReferenceType { name: String },

  #[error("undefined property type for schema node {node}")]
  UndeterminedPropertyType { node: String },

  #[error("missing config entry '{key}' in [{section}]")]
  MissingConfigEntry { section: &'static str, key: String },

  #[error("invalid filter regex '{pattern}'")]
  InvalidFilterRegex {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("stubs directory '{path}' does not exist")]
  MissingStubsDir { path: String },

  #[error("no import alias configured and '{path}' has no config.alias entry")]
  MissingAlias { path: String },
}

impl GenerationError {
  pub(crate) fn undetermined(node: &serde_json::Value) -> Self {
    Self::UndeterminedPropertyType {
      node: serde_json::to_string(node).unwrap_or_else(|_| String::from("<unprintable>")),
    }
  }
}
