//! Config file discovery for the file tier.
//!
//! Responsibilities:
//! - Define the `FileLocator` collaborator.
//! - Search an ordered list of directories for `<name>.<ext>` and read the first match.
//!
//! Does NOT handle:
//! - Parsing file contents (see `format.rs`).
//! - Merging (see `merge.rs`).
//!
//! Invariants:
//! - Directories are searched in the order given; the first existing file wins.
//! - Within a directory, extensions are tried in `Format::extensions` order.
//! - "Not found anywhere" is `Ok(None)`, never an error.
//! - A file that exists but cannot be read is `ConfigError::FileRead`.

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::format::Format;

/// A configuration file that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Finds and reads the configuration file for the file tier.
pub trait FileLocator: Send + Sync {
    /// Return the first `file_name.<ext>` found under `dirs`, or `None`.
    fn locate(
        &self,
        dirs: &[PathBuf],
        file_name: &str,
        format: Format,
    ) -> Result<Option<LocatedFile>, ConfigError>;
}

/// Searches the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLocator;

impl FileLocator for FsLocator {
    fn locate(
        &self,
        dirs: &[PathBuf],
        file_name: &str,
        format: Format,
    ) -> Result<Option<LocatedFile>, ConfigError> {
        let Some(path) = find_candidate(dirs, file_name, format) else {
            return Ok(None);
        };

        let contents = std::fs::read(&path).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        Ok(Some(LocatedFile { path, contents }))
    }
}

/// First existing candidate path, without reading it.
pub(crate) fn find_candidate(dirs: &[PathBuf], file_name: &str, format: Format) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| candidates(dir, file_name, format))
        .find(|path| path.is_file())
}

fn candidates<'a>(
    dir: &'a Path,
    file_name: &'a str,
    format: Format,
) -> impl Iterator<Item = PathBuf> + 'a {
    format
        .extensions()
        .iter()
        .map(move |ext| dir.join(format!("{file_name}.{ext}")))
}
