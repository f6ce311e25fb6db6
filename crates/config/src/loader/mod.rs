//! Layered configuration loader.
//!
//! Responsibilities:
//! - Provide `Options` for describing a loader and `ConfigLoader` for running it.
//! - Merge a default value, an optional JSON/YAML file and environment variables
//!   into a single typed configuration value.
//! - Expose the file and environment collaborators as traits.
//!
//! Does NOT handle:
//! - Codecs themselves (see `format.rs`).
//! - Watching files or reloading automatically.
//!
//! Invariants / Assumptions:
//! - Precedence is environment > file > default, per key.
//! - A missing config file is skipped, never an error.
//! - Every `load()` reseeds from the default.

mod builder;
mod decode;
mod env;
mod error;
mod file;
mod merge;
mod options;

pub use builder::ConfigLoader;
pub use env::{EnvReader, ProcessEnv, env_var_or_none};
pub use error::ConfigError;
pub use file::{FileLocator, FsLocator, LocatedFile};
pub use options::Options;

#[cfg(test)]
mod tests;
