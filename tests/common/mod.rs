// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides upgrade context builders and temp file fixtures for templates and config

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tmplgate::Context;

pub fn object(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub struct UpgradeBuilder {
    fields: Context,
}

impl UpgradeBuilder {
    pub fn new(dep_name: &str) -> Self {
        let mut fields = Context::new();
        fields.insert("depName".to_string(), json!(dep_name));
        Self { fields }
    }

    pub fn with_versions(mut self, current: &str, new: &str) -> Self {
        self.fields.insert("currentVersion".to_string(), json!(current));
        self.fields.insert("newVersion".to_string(), json!(new));
        self
    }

    pub fn major(mut self) -> Self {
        self.fields.insert("isMajor".to_string(), json!(true));
        self.fields.insert("updateType".to_string(), json!("major"));
        self
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn with_secret(self, key: &str) -> Self {
        self.with_field(key, json!("s3cr3t"))
    }

    pub fn build(self) -> Context {
        self.fields
    }

    pub fn build_value(self) -> Value {
        Value::Object(self.fields)
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

/// Collect the object keys a projection walks into: nested objects, and
/// objects that are direct elements of arrays
pub fn visited_keys(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(value, &mut keys);
    keys
}

fn collect_keys(value: &Value, keys: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                keys.push(key.clone());
                collect_keys(nested, keys);
            }
        }
        Value::Array(items) => {
            for item in items.iter().filter(|item| item.is_object()) {
                collect_keys(item, keys);
            }
        }
        _ => {}
    }
}
