//! Format codec for configuration documents.
//!
//! Every supported format is decoded into the same tagged-variant tree,
//! [`serde_json::Value`], so merge and persistence code never has to care
//! which syntax a file was written in. Typed views are produced afterwards
//! with [`decode_typed`].

pub mod errors;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use errors::CodecError;

/// A generic nested-mapping configuration document.
pub type ConfigDocument = Map<String, Value>;

/// Serialization formats understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yaml",
        }
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Yaml => "yml",
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(CodecError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Parse `content` into a value tree.
///
/// Empty or whitespace-only input decodes to an empty mapping for every format.
pub fn parse_value(content: &str, format: ConfigFormat) -> Result<Value, CodecError> {
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let parsed = match format {
        ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| CodecError::Parse { format, message })
}

/// Parse `content` and require a mapping at the top level.
///
/// A YAML document consisting only of `~`/`null` is treated as empty.
pub fn parse_document(content: &str, format: ConfigFormat) -> Result<ConfigDocument, CodecError> {
    match parse_value(content, format)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(CodecError::NotAMapping {
            format,
            found: value_kind(&other),
        }),
    }
}

/// Serialize a value to the given format.
///
/// TOML cannot represent `null`; null mapping entries are dropped before
/// encoding and a null anywhere else is an error.
pub fn serialize<T: Serialize + ?Sized>(
    value: &T,
    format: ConfigFormat,
) -> Result<String, CodecError> {
    let encoded = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        ConfigFormat::Toml => serde_json::to_value(value)
            .map_err(|e| e.to_string())
            .and_then(|tree| {
                toml::to_string_pretty(&strip_nulls(tree)).map_err(|e| e.to_string())
            }),
    };

    encoded.map_err(|message| CodecError::Serialize { format, message })
}

/// Read and parse a document from disk, inferring the format from the extension.
pub fn read_document(path: &Path) -> Result<ConfigDocument, CodecError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| CodecError::UnsupportedFormat {
        format: path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })?;
    read_document_as(path, format)
}

/// Read and parse a document from disk in an explicit format.
pub fn read_document_as(path: &Path, format: ConfigFormat) -> Result<ConfigDocument, CodecError> {
    let content = std::fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_document(&content, format).map_err(|e| e.with_path(path))
}

/// Convert a value tree into a typed structure.
pub fn decode_typed<T: DeserializeOwned>(value: Value) -> Result<T, CodecError> {
    serde_json::from_value(value).map_err(|e| CodecError::Shape {
        message: e.to_string(),
    })
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
