// ABOUTME: Template context types and global configuration snapshots
// ABOUTME: Merges the read-only global snapshot with caller-supplied fields for rendering

use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use super::error::{Result, TemplateError};

/// Data handed to a template: string keys mapping to arbitrary JSON values
pub type Context = Map<String, JsonValue>;

/// Immutable point-in-time view of process-wide configuration.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    values: Arc<Context>,
}

/// Source of the global configuration snapshot.
///
/// Loading and refreshing the configuration is the provider's business; the
/// compiler only calls `get` once per render.
pub trait GlobalConfigProvider: Send + Sync {
    fn get(&self) -> ConfigSnapshot;
}

impl ConfigSnapshot {
    pub fn new(values: Context) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    /// An empty snapshot
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from any JSON value; only objects are accepted
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self::new(map)),
            other => Err(TemplateError::InvalidContext(format!(
                "global configuration must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn values(&self) -> &Context {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl GlobalConfigProvider for ConfigSnapshot {
    fn get(&self) -> ConfigSnapshot {
        self.clone()
    }
}

impl From<Context> for ConfigSnapshot {
    fn from(values: Context) -> Self {
        Self::new(values)
    }
}

/// Shallow-merge caller fields over the global snapshot.
///
/// Caller fields win on collision. Neither input is modified.
pub fn merge_context(snapshot: &ConfigSnapshot, input: &Context) -> Context {
    let mut merged = snapshot.values().clone();
    for (key, value) in input {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
