//! Declarative behavior configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The data a behavior is built from: `{ "name": .., "type": .., ..fields }`.
///
/// A missing `name` or `type` deserializes to the empty string; the empty
/// type resolves to [`DefaultBehavior`][crate::DefaultBehavior].  Every other
/// key is kind-specific and kept verbatim in `properties`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorData {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub type_name: String,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl BehaviorData {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            type_name:  type_name.into(),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }

    /// Numeric field as `f32`, or `default` if absent or not a number.
    pub fn f32_or(&self, key: &str, default: f32) -> f32 {
        self.number(key).map_or(default, |v| v as f32)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.properties.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}
