//! Serialization formats and their codecs.
//!
//! Responsibilities:
//! - Define the two recognized configuration formats (`json`, `yaml`).
//! - Validate format names (`is_valid_format`).
//! - Encode a typed value into format bytes and decode format bytes into the
//!   format-agnostic merge-state (`serde_json::Value`).
//!
//! Does NOT handle:
//! - Locating or reading files (see `loader/file.rs`).
//! - Merging layers (see `loader/merge.rs`).
//!
//! Invariants:
//! - Format names are matched exactly; `"JSON"` or `" yaml"` are invalid.
//! - Decoding an empty document yields an empty mapping.
//! - YAML tags (`!Variant value`) decode to a single-key mapping
//!   (`{Variant: value}`), the shape serde uses for externally tagged enums.
//! - YAML scalar mapping keys (integers, booleans) decode to their string form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use serde_yaml::value::TaggedValue;
use thiserror::Error;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
}

/// Errors raised by a format codec.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed, but its top level is not a key/value mapping.
    #[error("expected a mapping at the top level, found {found}")]
    NotAMapping { found: &'static str },

    /// A YAML mapping key is itself a sequence, mapping or tagged value.
    #[error("unsupported mapping key: {found}")]
    UnsupportedKey { found: &'static str },
}

/// Returns whether `candidate` names a recognized format.
pub fn is_valid_format(candidate: &str) -> bool {
    candidate == Format::Json.as_str() || candidate == Format::Yaml.as_str()
}

impl Format {
    /// Canonical lowercase name of the format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// File extensions searched for this format, in priority order.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Yaml => &["yaml", "yml"],
        }
    }

    /// Serialize `value` into this format.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Format::Json => Ok(serde_json::to_vec(value)?),
            Format::Yaml => Ok(serde_yaml::to_string(value)?.into_bytes()),
        }
    }

    /// Parse `bytes` in this format into a key/value mapping.
    pub fn decode(self, bytes: &[u8]) -> Result<Value, CodecError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }

        let value: Value = match self {
            Format::Json => serde_json::from_slice(bytes)?,
            Format::Yaml => yaml_to_json(serde_yaml::from_slice(bytes)?)?,
        };

        if value.is_object() {
            return Ok(value);
        }
        // A YAML document holding only comments decodes to null.
        if value.is_null() {
            return Ok(Value::Object(Map::new()));
        }

        Err(CodecError::NotAMapping {
            found: value_kind(&value),
        })
    }
}

/// Convert a YAML tree into the JSON merge-state.
fn yaml_to_json(value: YamlValue) -> Result<Value, CodecError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| Ok((mapping_key(key)?, yaml_to_json(value)?)))
                .collect::<Result<_, CodecError>>()?,
        ),
        YamlValue::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let tag = tag.to_string();
            let variant = tag.strip_prefix('!').unwrap_or(&tag).to_string();

            let mut map = Map::new();
            map.insert(variant, yaml_to_json(value)?);
            Value::Object(map)
        }
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::from(i);
    }
    if let Some(u) = n.as_u64() {
        return Value::from(u);
    }
    // `.nan` and `.inf` have no JSON number form.
    n.as_f64()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(n.to_string()), Value::Number)
}

fn mapping_key(key: YamlValue) -> Result<String, CodecError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Sequence(_) => Err(CodecError::UnsupportedKey { found: "a sequence" }),
        YamlValue::Mapping(_) => Err(CodecError::UnsupportedKey { found: "a mapping" }),
        YamlValue::Tagged(_) => Err(CodecError::UnsupportedKey {
            found: "a tagged value",
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Error returned when parsing an unrecognized format name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid config format '{0}'. valid values are: json, yaml")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_format(s) {
            return Err(UnknownFormat(s.to_string()));
        }
        Ok(if s == "json" { Format::Json } else { Format::Yaml })
    }
}
