//! Builder-style options for constructing a [`ConfigLoader`].
//!
//! Responsibilities:
//! - Collect the caller's loader settings before validation.
//! - Hold the pluggable environment and file collaborators.
//!
//! Does NOT handle:
//! - Validation (see `builder.rs`, which runs when `build()` is called).
//!
//! Invariants / Assumptions:
//! - Nothing here performs I/O; directories are resolved lazily during `load`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::builder::ConfigLoader;
use super::env::{EnvReader, ProcessEnv};
use super::error::ConfigError;
use super::file::{FileLocator, FsLocator};
use crate::paths::user_config_dir;

/// Options describing where and how configuration for `T` is loaded.
pub struct Options<T> {
    pub(crate) format: Option<String>,
    pub(crate) default: Option<T>,
    pub(crate) file_name: Option<String>,
    pub(crate) file_locations: Vec<PathBuf>,
    pub(crate) env_enabled: bool,
    pub(crate) env_prefix: Option<String>,
    pub(crate) dotenv_path: Option<PathBuf>,
    pub(crate) env_reader: Arc<dyn EnvReader>,
    pub(crate) file_locator: Arc<dyn FileLocator>,
}

impl<T> Default for Options<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Options<T> {
    /// Create empty options: YAML, file name `config`, no search
    /// locations, environment overrides disabled and no default value.
    pub fn new() -> Self {
        Self {
            format: None,
            default: None,
            file_name: None,
            file_locations: Vec::new(),
            env_enabled: false,
            env_prefix: None,
            dotenv_path: None,
            env_reader: Arc::new(ProcessEnv),
            file_locator: Arc::new(FsLocator),
        }
    }

    /// Set the serialization format by name (`"json"` or `"yaml"`).
    ///
    /// Accepts a [`Format`](crate::Format) as well. Unrecognized names are
    /// reported by `build()`.
    pub fn with_format(mut self, format: impl AsRef<str>) -> Self {
        self.format = Some(format.as_ref().to_string());
        self
    }

    /// Set the default value every load starts from.
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the configuration file base name, without extension.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Append a directory to search for the configuration file.
    pub fn with_file_location(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_locations.push(dir.into());
        self
    }

    /// Append several directories, preserving their order.
    pub fn with_file_locations<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.file_locations.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Append the platform configuration directory for `app_name`
    /// (e.g. `~/.config/<app_name>` on Linux).
    ///
    /// Does nothing when no home directory can be determined.
    pub fn with_user_config_dir(mut self, app_name: &str) -> Self {
        match user_config_dir(app_name) {
            Some(dir) => self.file_locations.push(dir),
            None => tracing::debug!(app_name, "no platform config directory available"),
        }
        self
    }

    /// Enable or disable environment variable overrides.
    pub fn with_env_enabled(mut self, enabled: bool) -> Self {
        self.env_enabled = enabled;
        self
    }

    /// Only consider environment variables named `<PREFIX>_<KEY>`.
    ///
    /// The prefix is uppercased.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Consult a `.env` file for variables the environment does not set.
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Replace the environment source (defaults to the process environment).
    pub fn with_env_reader(mut self, reader: impl EnvReader + 'static) -> Self {
        self.env_reader = Arc::new(reader);
        self
    }

    /// Replace the file locator (defaults to the local file system).
    pub fn with_file_locator(mut self, locator: impl FileLocator + 'static) -> Self {
        self.file_locator = Arc::new(locator);
        self
    }
}

impl<T> Options<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Validate the options and create a loader.
    pub fn build(self) -> Result<ConfigLoader<T>, ConfigError> {
        ConfigLoader::new(self)
    }
}

impl<T: fmt::Debug> fmt::Debug for Options<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("format", &self.format)
            .field("default", &self.default)
            .field("file_name", &self.file_name)
            .field("file_locations", &self.file_locations)
            .field("env_enabled", &self.env_enabled)
            .field("env_prefix", &self.env_prefix)
            .field("dotenv_path", &self.dotenv_path)
            .finish_non_exhaustive()
    }
}
