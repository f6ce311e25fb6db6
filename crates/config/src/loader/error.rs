//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for loader construction and every merge tier.
//!
//! Does NOT handle:
//! - Codec-level failures in isolation (see `format::CodecError`, wrapped here).
//!
//! Invariants:
//! - Every variant is terminal for the call that produced it.
//! - File-not-found is not an error; it never appears here.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::{CodecError, Format};

/// Errors that can occur while building a loader or loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config format '{format}'. valid values are: json, yaml")]
    InvalidFormat { format: String },

    #[error(
        "default value is missing. you must provide a valid default value for your configuration struct"
    )]
    MissingDefault,

    /// The default value could not be round-tripped through the configured format.
    #[error("failed to serialize default configuration as {format}: {source}")]
    Serialization {
        format: Format,
        #[source]
        source: CodecError,
    },

    #[error("failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// The merged key/value store does not fit the target type.
    #[error("failed to decode merged configuration: {0}")]
    Decode(#[source] serde_json::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error("failed to parse .env file at position {error_index}")]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("failed to load .env file")]
    DotenvUnknown,
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotenv_parse_error_hides_line_contents() {
        let err: ConfigError =
            dotenvy::Error::LineParse("SECRET=\"unterminated".to_string(), 7).into();

        assert!(matches!(err, ConfigError::DotenvParse { error_index: 7 }));
        assert!(!err.to_string().contains("SECRET"));
    }

    #[test]
    fn test_dotenv_io_error_keeps_kind_only() {
        let io = std::io::Error::new(ErrorKind::PermissionDenied, "/secret/path/.env");
        let err: ConfigError = dotenvy::Error::Io(io).into();

        assert!(matches!(
            err,
            ConfigError::DotenvIo {
                kind: ErrorKind::PermissionDenied
            }
        ));
        assert!(!err.to_string().contains("/secret/path"));
    }

    #[test]
    fn test_invalid_format_message() {
        let err = ConfigError::InvalidFormat {
            format: "toml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config format 'toml'. valid values are: json, yaml"
        );
    }
}
