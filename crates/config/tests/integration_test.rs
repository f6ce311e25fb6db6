//! Integration tests for the public loading API.
//!
//! These tests drive the crate only through its re-exports, the way an
//! application would: describe a loader with `Options`, build it once, and
//! load configuration from defaults, files and the environment.

use serde::{Deserialize, Serialize};
use serial_test::serial;
use tempfile::TempDir;
use tiered_config::{ConfigError, ConfigLoader, Format, Options, is_valid_format};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AppConfig {
    #[serde(rename = "listen_addr")]
    address: String,
    workers: u32,
    features: Features,
    #[serde(default)]
    motd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Features {
    metrics: bool,
    cache_ttl_secs: u64,
}

fn app_default() -> AppConfig {
    AppConfig {
        address: "127.0.0.1:8080".to_string(),
        workers: 4,
        features: Features {
            metrics: false,
            cache_ttl_secs: 60,
        },
        motd: None,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tiered_config=trace")
        .with_test_writer()
        .try_init();
}

/// Test the full precedence chain: env > file > default.
#[test]
#[serial]
fn test_full_precedence_chain() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("app.yaml"),
        "listen_addr: \"0.0.0.0:9000\"\nfeatures:\n  metrics: true\n",
    )
    .unwrap();

    let loader: ConfigLoader<AppConfig> = Options::new()
        .with_format(Format::Yaml)
        .with_file_name("app")
        .with_file_location(temp_dir.path())
        .with_env_enabled(true)
        .with_env_prefix("tiered_it")
        .with_default(app_default())
        .build()
        .expect("loader should build");

    temp_env::with_vars(
        [
            ("TIERED_IT_WORKERS", Some("16")),
            ("TIERED_IT_FEATURES_METRICS", Some("false")),
        ],
        || {
            let config = loader.load().expect("config should load");
            assert_eq!(config.address, "0.0.0.0:9000", "file overrides default");
            assert_eq!(config.workers, 16, "env overrides default");
            assert!(!config.features.metrics, "env overrides file");
            assert_eq!(config.features.cache_ttl_secs, 60, "default retained");
            assert_eq!(config.motd, None);
        },
    );
}

/// Renamed fields are addressed by their serialized name in every tier.
#[test]
#[serial]
fn test_serde_renames_drive_key_names() {
    let loader = Options::new()
        .with_format(Format::Json)
        .with_env_enabled(true)
        .with_env_prefix("tiered_it")
        .with_default(app_default())
        .build()
        .unwrap();

    assert_eq!(loader.env_var_name("listen_addr"), "TIERED_IT_LISTEN_ADDR");

    temp_env::with_vars(
        [
            ("TIERED_IT_LISTEN_ADDR", Some("[::1]:443")),
            ("TIERED_IT_ADDRESS", Some("ignored")),
        ],
        || {
            let config = loader.load().unwrap();
            assert_eq!(config.address, "[::1]:443");
        },
    );
}

/// A key whose default is null can still be set from the environment.
#[test]
#[serial]
fn test_null_default_accepts_string_override() {
    let loader = Options::new()
        .with_env_enabled(true)
        .with_env_prefix("tiered_it")
        .with_default(app_default())
        .build()
        .unwrap();

    temp_env::with_vars([("TIERED_IT_MOTD", Some("hello"))], || {
        let config = loader.load().unwrap();
        assert_eq!(config.motd.as_deref(), Some("hello"));
    });
}

#[test]
fn test_construction_errors_are_reported() {
    let missing = Options::<AppConfig>::new().build();
    assert!(matches!(missing, Err(ConfigError::MissingDefault)));

    let invalid = Options::new()
        .with_format("N/A")
        .with_default(app_default())
        .build();
    assert!(matches!(invalid, Err(ConfigError::InvalidFormat { .. })));
}

#[test]
fn test_format_validator_exported() {
    assert!(is_valid_format("json"));
    assert!(is_valid_format("yaml"));
    assert!(!is_valid_format("toml"));
}

#[test]
fn test_defaults_only_round_trip_both_formats() {
    for format in [Format::Json, Format::Yaml] {
        let loader = Options::new()
            .with_format(format)
            .with_default(app_default())
            .build()
            .unwrap();

        assert_eq!(loader.load().unwrap(), app_default());
    }
}

#[test]
fn test_error_messages_name_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let loader = Options::new()
        .with_format(Format::Json)
        .with_file_location(temp_dir.path())
        .with_default(app_default())
        .build()
        .unwrap();

    let err = loader.load().unwrap_err();
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_user_config_dir_is_appended_last() {
    let loader = Options::new()
        .with_file_location("/etc/tiered-it")
        .with_user_config_dir("tiered-it")
        .with_default(app_default())
        .build()
        .unwrap();

    let locations = loader.file_locations();
    assert_eq!(locations[0], std::path::PathBuf::from("/etc/tiered-it"));
    if let Some(user_dir) = tiered_config::paths::user_config_dir("tiered-it") {
        assert_eq!(locations.last(), Some(&user_dir));
    }
}
