use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::{Map, Number, Value};

use crate::generator::document::SchemaDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  fn from_location(location: &str) -> Self {
    Path::new(location.split(['?', '#']).next().unwrap_or(location))
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

enum SpecContent {
  Mapped(AsyncMmapFile),
  Fetched(Vec<u8>),
}

impl SpecContent {
  fn as_slice(&self) -> &[u8] {
    match self {
      Self::Mapped(file) => file.as_slice(),
      Self::Fetched(bytes) => bytes,
    }
  }
}

/// Reads a schema document from a local file or an `http(s)` URL.
pub struct SpecLoader {
  content: SpecContent,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(input: &str) -> anyhow::Result<Self> {
    let format = SpecFormat::from_location(input);

    let content = if is_url(input) {
      let response = reqwest::get(input)
        .await
        .with_context(|| format!("Failed to fetch '{input}'"))?
        .error_for_status()?;
      SpecContent::Fetched(response.bytes().await?.to_vec())
    } else {
      let file = AsyncMmapFile::open(Path::new(input))
        .await
        .with_context(|| format!("Failed to open '{input}'"))?;
      SpecContent::Mapped(file)
    };

    Ok(Self { content, format })
  }

  /// Decodes the document; JSON is tried first unless the extension says YAML.
  pub fn parse(&self) -> anyhow::Result<SchemaDocument> {
    let bytes = self.content.as_slice();
    let root = match self.format {
      SpecFormat::Yaml => parse_yaml(bytes)?,
      SpecFormat::Json => match serde_json::from_slice(bytes) {
        Ok(root) => root,
        Err(json_err) => parse_yaml(bytes).map_err(|_| json_err)?,
      },
    };
    Ok(SchemaDocument::new(root))
  }
}

fn is_url(input: &str) -> bool {
  input.starts_with("http://") || input.starts_with("https://")
}

pub(crate) fn parse_yaml(bytes: &[u8]) -> anyhow::Result<Value> {
  let value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
  yaml_to_json(value)
}

/// Converts a YAML tree into JSON, stringifying scalar mapping keys such as unquoted status codes.
fn yaml_to_json(value: serde_yaml::Value) -> anyhow::Result<Value> {
  Ok(match value {
    serde_yaml::Value::Null => Value::Null,
    serde_yaml::Value::Bool(flag) => Value::Bool(flag),
    serde_yaml::Value::Number(number) => yaml_number(&number),
    serde_yaml::Value::String(text) => Value::String(text),
    serde_yaml::Value::Sequence(items) => {
      Value::Array(items.into_iter().map(yaml_to_json).collect::<anyhow::Result<_>>()?)
    }
    serde_yaml::Value::Mapping(mapping) => {
      let mut object = Map::with_capacity(mapping.len());
      for (key, value) in mapping {
        object.insert(yaml_key(key)?, yaml_to_json(value)?);
      }
      Value::Object(object)
    }
    serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
  })
}

fn yaml_number(number: &serde_yaml::Number) -> Value {
  if let Some(int) = number.as_i64() {
    Value::from(int)
  } else if let Some(uint) = number.as_u64() {
    Value::from(uint)
  } else {
    number.as_f64().and_then(Number::from_f64).map_or(Value::Null, Value::Number)
  }
}

fn yaml_key(key: serde_yaml::Value) -> anyhow::Result<String> {
  match key {
    serde_yaml::Value::String(text) => Ok(text),
    serde_yaml::Value::Number(number) => Ok(number.to_string()),
    serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
    serde_yaml::Value::Null => Ok("null".to_string()),
    serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
    other => anyhow::bail!("Unsupported YAML mapping key: {other:?}"),
  }
}
