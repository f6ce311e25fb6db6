//! Configuration loader construction and the three-tier merge.
//!
//! Responsibilities:
//! - Validate `Options` into a reusable `ConfigLoader`.
//! - Run the merge pipeline on every `load()`: default, then file, then environment.
//! - Decode the merged key/value store into the target type.
//!
//! Does NOT handle:
//! - Environment variable naming and coercion (delegated to env.rs).
//! - File discovery (delegated to file.rs via `FileLocator`).
//! - Format encode/decode (delegated to format.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over the file, which takes
//!   precedence over the default, key by key.
//! - `build()` performs no I/O.
//! - Every `load()` reseeds from the default and re-reads file and
//!   environment; nothing is cached between calls.
//! - `load()` keeps all merge-state local, so one loader can serve
//!   concurrent callers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::decode::from_value;
use super::env::{EnvReader, WithDotenv, apply_env, env_var_name};
use super::error::ConfigError;
use super::file::{FileLocator, find_candidate};
use super::merge::merge_into;
use super::options::Options;
use crate::constants::{DEFAULT_FILE_NAME, DEFAULT_FORMAT};
use crate::format::Format;

/// A validated, reusable loader for configuration of type `T`.
#[derive(Clone)]
pub struct ConfigLoader<T> {
    format: Format,
    default: T,
    file_name: String,
    file_locations: Vec<PathBuf>,
    env: Option<EnvSettings>,
    env_reader: Arc<dyn EnvReader>,
    file_locator: Arc<dyn FileLocator>,
}

/// Environment tier settings, present only when overrides are enabled.
#[derive(Debug, Clone)]
struct EnvSettings {
    /// Already uppercased.
    prefix: Option<String>,
    dotenv_path: Option<PathBuf>,
}

impl<T> ConfigLoader<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Validate `options` and create a loader.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingDefault` when no default value was given.
    /// - `ConfigError::InvalidFormat` when the format is not `json` or `yaml`.
    pub fn new(options: Options<T>) -> Result<Self, ConfigError> {
        let default = options.default.ok_or(ConfigError::MissingDefault)?;

        let format = match options.format.as_deref() {
            None | Some("") => DEFAULT_FORMAT,
            Some(name) => name
                .parse::<Format>()
                .map_err(|e| ConfigError::InvalidFormat { format: e.0 })?,
        };

        let file_name = options
            .file_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        let env = options.env_enabled.then(|| EnvSettings {
            prefix: options
                .env_prefix
                .filter(|prefix| !prefix.is_empty())
                .map(|prefix| prefix.to_uppercase()),
            dotenv_path: options.dotenv_path,
        });

        Ok(Self {
            format,
            default,
            file_name,
            file_locations: options.file_locations,
            env,
            env_reader: options.env_reader,
            file_locator: options.file_locator,
        })
    }

    /// Load the configuration by merging default, file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default cannot be serialized in the configured format (`ConfigError::Serialization`)
    /// - A config file exists but cannot be read or parsed (`ConfigError::FileRead`, `ConfigError::FileParse`)
    /// - A `.env` file exists but is invalid (`ConfigError::DotenvParse`, `ConfigError::DotenvIo`)
    /// - The merged data does not fit `T` (`ConfigError::Decode`)
    ///
    /// Strings are accepted where `T` expects a number or boolean, and the
    /// reverse, so overrides of `Option<u16>` and similar fields decode.
    ///
    /// A missing config file is not an error; the file tier is skipped.
    pub fn load(&self) -> Result<T, ConfigError> {
        let merged = self.load_value()?;
        from_value(merged).map_err(ConfigError::Decode)
    }

    /// Run the merge pipeline and return the merged key/value store
    /// without decoding it into `T`.
    pub fn load_value(&self) -> Result<Value, ConfigError> {
        let mut state = self.seed()?;
        self.merge_file(&mut state)?;
        if let Some(env) = &self.env {
            self.merge_env(&mut state, env)?;
        }
        Ok(state)
    }

    /// Encode the default in the configured format and decode it back as the base layer.
    fn seed(&self) -> Result<Value, ConfigError> {
        let to_error = |source| ConfigError::Serialization {
            format: self.format,
            source,
        };

        let bytes = self.format.encode(&self.default).map_err(to_error)?;
        self.format.decode(&bytes).map_err(to_error)
    }

    fn merge_file(&self, state: &mut Value) -> Result<(), ConfigError> {
        let located = self
            .file_locator
            .locate(&self.file_locations, &self.file_name, self.format)?;

        let Some(file) = located else {
            tracing::debug!(
                file_name = %self.file_name,
                locations = self.file_locations.len(),
                "no config file found; skipping file tier"
            );
            return Ok(());
        };

        let overlay = self
            .format
            .decode(&file.contents)
            .map_err(|source| ConfigError::FileParse {
                path: file.path.clone(),
                source,
            })?;

        tracing::debug!(path = %file.path.display(), "merging config file");
        merge_into(state, overlay);
        Ok(())
    }

    fn merge_env(&self, state: &mut Value, env: &EnvSettings) -> Result<(), ConfigError> {
        let prefix = env.prefix.as_deref();

        let applied = match &env.dotenv_path {
            Some(path) => {
                let reader = WithDotenv::load(&*self.env_reader, path)?;
                apply_env(state, prefix, &reader)
            }
            None => apply_env(state, prefix, &*self.env_reader),
        };

        tracing::debug!(applied, "environment tier merged");
        Ok(())
    }
}

impl<T> ConfigLoader<T> {
    /// Path of the file the file tier would read right now, if any.
    ///
    /// Only meaningful with the default file-system locator.
    pub fn locate_file(&self) -> Option<PathBuf> {
        find_candidate(&self.file_locations, &self.file_name, self.format)
    }

    /// Environment variable consulted for a dotted key path (`server.port`).
    pub fn env_var_name(&self, key_path: &str) -> String {
        let prefix = self.env.as_ref().and_then(|env| env.prefix.as_deref());
        env_var_name(prefix, key_path)
    }

    /// The validated serialization format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Configuration file base name (without extension).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directories searched for the configuration file, in order.
    pub fn file_locations(&self) -> &[PathBuf] {
        &self.file_locations
    }

    /// Whether environment overrides are applied.
    pub fn env_enabled(&self) -> bool {
        self.env.is_some()
    }

    /// Uppercased environment prefix, when overrides are enabled and a prefix was set.
    pub fn env_prefix(&self) -> Option<&str> {
        self.env.as_ref().and_then(|env| env.prefix.as_deref())
    }

    /// `.env` file consulted below the environment, if configured.
    pub fn dotenv_path(&self) -> Option<&Path> {
        self.env
            .as_ref()
            .and_then(|env| env.dotenv_path.as_deref())
    }

    /// The default value every load starts from.
    pub fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ConfigLoader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("format", &self.format)
            .field("default", &self.default)
            .field("file_name", &self.file_name)
            .field("file_locations", &self.file_locations)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
