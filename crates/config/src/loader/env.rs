//! Environment variable overrides for configuration.
//!
//! Responsibilities:
//! - Define the `EnvReader` collaborator and its process-environment implementation.
//! - Map key paths to environment variable names (`server.port` -> `APP_SERVER_PORT`).
//! - Apply present variables over the merge-state, coercing them toward the
//!   type of the value they replace.
//! - Read `.env` files as a fallback source without touching the process environment.
//!
//! Does NOT handle:
//! - Deciding whether the environment tier runs (see `builder.rs`).
//! - Decoding the merged result (type mismatches surface as `ConfigError::Decode`).
//!
//! Invariants:
//! - Only keys already present in the merge-state can be overridden.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Any other value is used exactly as set, surrounding whitespace included.
//! - Values that cannot be coerced are kept as strings.
//! - Variable values are never logged.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Number, Value};

use super::error::ConfigError;
use super::merge::{get_path_mut, leaf_paths};
use crate::constants::{ENV_KEY_SEPARATOR, ENV_LIST_SEPARATOR, KEY_PATH_SEPARATOR};

/// Source of environment variable values.
///
/// Implementations must be safe to call from several threads at once.
pub trait EnvReader: Send + Sync {
    /// Value of `name`, or `None` when the variable is absent.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env_var_or_none(name)
    }
}

impl EnvReader for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|s| non_blank(s.clone()))
    }
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
///
/// Other values are returned unmodified.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(non_blank)
}

fn non_blank(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}

/// Environment variable name for a dotted key path.
///
/// `prefix` is expected to be uppercased already.
pub(crate) fn env_var_name(prefix: Option<&str>, key_path: &str) -> String {
    let key: String = key_path
        .chars()
        .map(|c| {
            if c == KEY_PATH_SEPARATOR {
                ENV_KEY_SEPARATOR
            } else {
                c
            }
        })
        .collect::<String>()
        .to_uppercase();

    match prefix {
        Some(prefix) => format!("{prefix}{ENV_KEY_SEPARATOR}{key}"),
        None => key,
    }
}

/// Apply environment overrides to every leaf key of `state`.
///
/// Returns the number of keys that were overridden.
pub(crate) fn apply_env(state: &mut Value, prefix: Option<&str>, reader: &dyn EnvReader) -> usize {
    let separator = KEY_PATH_SEPARATOR.to_string();
    let mut applied = 0;

    for path in leaf_paths(state) {
        let key_path = path.join(separator.as_str());
        let name = env_var_name(prefix, &key_path);

        let Some(raw) = reader.var(&name) else {
            continue;
        };
        let Some(slot) = get_path_mut(state, &path) else {
            continue;
        };

        *slot = coerce(raw, slot);
        applied += 1;
        tracing::trace!(var = %name, key = %key_path, "environment override applied");
    }

    applied
}

/// Convert a raw environment string toward the JSON type of `current`.
pub(crate) fn coerce(raw: String, current: &Value) -> Value {
    match current {
        Value::Bool(_) => parse_bool(&raw).map_or(Value::String(raw), Value::Bool),
        Value::Number(n) => parse_number(&raw, n.is_f64()).map_or(Value::String(raw), Value::Number),
        Value::Array(items) => {
            let template = items.first().cloned().unwrap_or(Value::Null);
            Value::Array(
                raw.split(ENV_LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| coerce(item.to_string(), &template))
                    .collect(),
            )
        }
        _ => Value::String(raw),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_number(raw: &str, prefer_float: bool) -> Option<Number> {
    if !prefer_float {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(Number::from(i));
        }
        if let Ok(u) = raw.parse::<u64>() {
            return Some(Number::from(u));
        }
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Primary reader backed by the entries of a `.env` file.
pub(crate) struct WithDotenv<'a> {
    primary: &'a dyn EnvReader,
    fallback: HashMap<String, String>,
}

impl<'a> WithDotenv<'a> {
    /// Parse `path` and layer it below `primary`.
    ///
    /// A missing file yields an empty fallback.
    pub(crate) fn load(primary: &'a dyn EnvReader, path: &Path) -> Result<Self, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if is_not_found(&e) => {
                tracing::debug!(path = %path.display(), "no .env file; skipping");
                return Ok(Self {
                    primary,
                    fallback: HashMap::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let fallback = iter.collect::<Result<HashMap<_, _>, _>>()?;
        tracing::debug!(path = %path.display(), entries = fallback.len(), "loaded .env file");

        Ok(Self { primary, fallback })
    }
}

impl EnvReader for WithDotenv<'_> {
    fn var(&self, name: &str) -> Option<String> {
        self.primary.var(name).or_else(|| self.fallback.var(name))
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
