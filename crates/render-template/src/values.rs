//! Value trees placeholders resolve against
//!
//! A tree is assembled from values files layered in order, followed by
//! `path=value` overrides. Layering is a recursive merge: mappings merge
//! key by key, sequences on both sides are concatenated, anything else on
//! the right replaces the left.

use render_fs::{ConfigStore, NormalizedPath};
use serde_json::{Map, Value};

use crate::path::{self, PlaceholderPath};
use crate::{Error, Result};

/// Hierarchical attribute tree supplied at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTree {
    root: Value,
}

impl Default for ValueTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Load and layer values files, later files taking precedence.
    pub fn load(store: &ConfigStore, paths: &[NormalizedPath]) -> Result<Self> {
        let mut tree = Self::new();
        for file in paths {
            let layer: Value = store.load(file)?;
            tracing::debug!(file = %file, "merging values file");
            tree.merge(layer);
        }
        Ok(tree)
    }

    /// Merge another layer into this tree.
    pub fn merge(&mut self, layer: Value) {
        let root = std::mem::take(&mut self.root);
        self.root = merge_values(root, layer);
    }

    /// Set a value, creating intermediate mappings.
    pub fn set(&mut self, path: &PlaceholderPath, value: Value) -> Result<()> {
        path::set_at_path(&mut self.root, path, value)
    }

    /// Apply a command-line override of the form `path=value`.
    ///
    /// The value is always stored as a string.
    pub fn apply_override(&mut self, input: &str) -> Result<()> {
        let (raw_path, raw_value) = input.split_once('=').ok_or_else(|| Error::InvalidOverride {
            input: input.to_string(),
        })?;
        let path = PlaceholderPath::parse(raw_path.trim())?;
        tracing::debug!(path = %path, "applying override");
        self.set(&path, Value::String(raw_value.to_string()))
    }

    /// Look up the value at a path. `null` counts as absent.
    pub fn lookup(&self, path: &PlaceholderPath) -> Option<&Value> {
        path::get_at_path(&self.root, path.segments()).filter(|v| !v.is_null())
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

/// Recursively merge `right` into `left`.
fn merge_values(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Object(mut left_map), Value::Object(right_map)) => {
            for (key, right_value) in right_map {
                let merged = match left_map.remove(&key) {
                    Some(left_value) => merge_values(left_value, right_value),
                    None => right_value,
                };
                left_map.insert(key, merged);
            }
            Value::Object(left_map)
        }
        (Value::Array(mut left_items), Value::Array(right_items)) => {
            left_items.extend(right_items);
            Value::Array(left_items)
        }
        (_, right) => right,
    }
}

/// The textual form of a scalar, `None` for mappings and sequences.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
