//! Layered configuration loading.
//!
//! This crate resolves a strongly-typed configuration value from three
//! tiers: a compile-time default, an optional JSON or YAML file, and
//! environment variable overrides.
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use tiered_config::{Format, Options};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! let loader = Options::new()
//!     .with_format(Format::Yaml)
//!     .with_default(AppConfig { host: "localhost".into(), port: 8080 })
//!     .with_file_location("/etc/my-app")
//!     .with_env_enabled(true)
//!     .with_env_prefix("my_app")
//!     .build()?;
//!
//! // MY_APP_PORT=9090 overrides `port`, whatever /etc/my-app/config.yaml says.
//! let config = loader.load()?;
//! # Ok::<(), tiered_config::ConfigError>(())
//! ```

pub mod constants;
pub mod format;
mod loader;
pub mod paths;

pub use format::{CodecError, Format, UnknownFormat, is_valid_format};
pub use loader::{
    ConfigError, ConfigLoader, EnvReader, FileLocator, FsLocator, LocatedFile, Options,
    ProcessEnv, env_var_or_none,
};
