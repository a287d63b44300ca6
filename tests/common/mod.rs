//! Common test utilities for configx integration tests
//!
//! Provides shared fixtures and helper functions.

#![allow(dead_code)]

use configx::ConfigTree;
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture that provides a temporary directory and a populated tree
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub tree: ConfigTree,
}

impl TestFixture {
    /// Create a new fixture with the sample server config loaded
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut tree = ConfigTree::new();
        tree.load_dict(&sample_config()).expect("Failed to load sample config");

        Self { temp_dir, tree }
    }

    /// Create a fixture with an empty tree
    pub fn empty() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            tree: ConfigTree::new(),
        }
    }

    /// Path for a binary config file inside the temp dir
    pub fn bin_path(&self) -> PathBuf {
        self.temp_dir.path().join("system.cfgx")
    }

    /// Path for a JSON export inside the temp dir
    pub fn json_path(&self) -> PathBuf {
        self.temp_dir.path().join("system.json")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One leaf of every scalar kind, nested two levels deep
pub fn sample_config() -> Value {
    json!({
        "server": {
            "name": "Alpha",
            "port": 8080,
            "active": true,
            "load": 45.5,
            "tls": {
                "cert": "/etc/ssl/cert.pem",
                "key": null,
            },
        },
        "logging": {
            "level": "info",
        },
    })
}

/// The tree's export as a JSON value, for whole-tree comparisons
pub fn snapshot(tree: &ConfigTree) -> Value {
    Value::Object(tree.to_dict())
}
