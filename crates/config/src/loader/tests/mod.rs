//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test option validation performed by `build()`.
//! - Test each merge tier and their precedence.
//! - Test `.env` fallback loading through the loader.
//!
//! Does NOT handle:
//! - Codec details (tested in format.rs).
//! - Merge primitives and env coercion in isolation (tested in merge.rs and env.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    pub foo: String,
    pub bar: String,
    pub baz: String,
}

pub fn mock_default() -> MockConfig {
    MockConfig {
        foo: "foo".to_string(),
        bar: "bar".to_string(),
        baz: "baz".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub debug: bool,
    pub server: Listener,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    pub host: String,
    pub port: u16,
    pub ratio: f64,
}

pub fn server_default() -> ServerConfig {
    ServerConfig {
        name: "svc".to_string(),
        debug: false,
        server: Listener {
            host: "localhost".to_string(),
            port: 8080,
            ratio: 0.5,
        },
        tags: vec!["default".to_string()],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Auth {
    Anonymous,
    Token(String),
    Basic { user: String, password: String },
}

/// Field shapes that do not map one-to-one onto JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapesConfig {
    pub auth: Auth,
    pub fallback: Auth,
    pub port: Option<u16>,
    pub routes: HashMap<u32, String>,
}

pub fn shapes_default() -> ShapesConfig {
    ShapesConfig {
        auth: Auth::Token("t".to_string()),
        fallback: Auth::Anonymous,
        port: None,
        routes: HashMap::from([(80, "http".to_string())]),
    }
}

/// Write `contents` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write config file");
}
