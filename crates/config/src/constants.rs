//! Centralized constants for the tiered configuration loader.
//!
//! This module contains default values and naming rules shared by the
//! builder, the merge engine and the collaborators.

use crate::format::Format;

// =============================================================================
// Builder Defaults
// =============================================================================

/// Serialization format used when the caller does not pick one.
pub const DEFAULT_FORMAT: Format = Format::Yaml;

/// Base name (without extension) of the configuration file.
pub const DEFAULT_FILE_NAME: &str = "config";

// =============================================================================
// Key Mapping
// =============================================================================

/// Separator between segments of a key path (`server.port`).
pub const KEY_PATH_SEPARATOR: char = '.';

/// Replacement for [`KEY_PATH_SEPARATOR`] in environment variable names,
/// also used to join the prefix to the key (`APP_SERVER_PORT`).
pub const ENV_KEY_SEPARATOR: char = '_';

/// Separator used to split an environment value into array elements.
pub const ENV_LIST_SEPARATOR: char = ',';
