//! Declarative scene data, as exported by the editor.
//!
//! ```json
//! {
//!   "config":  { "frame_duration_ms": 16, "total_frames": 600, "seed": 7 },
//!   "objects": [
//!     { "name": "hero", "x": 10, "y": 20, "width": 32, "height": 32,
//!       "behaviors": [ { "name": "move", "type": "Mover", "speed": 120, "axis": "x" } ] }
//!   ]
//! }
//! ```

use std::path::Path;

use rt_behavior::BehaviorData;
use rt_core::SceneConfig;
use serde::{Deserialize, Serialize};

use crate::SceneResult;

/// One object instance: initial geometry plus its behaviors in attachment order.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectData {
    pub name:      String,
    pub x:         f32,
    pub y:         f32,
    pub width:     f32,
    pub height:    f32,
    /// Degrees.
    pub angle:     f32,
    pub behaviors: Vec<BehaviorData>,
}

impl ObjectData {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorData) -> Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn behavior(&self, name: &str) -> Option<&BehaviorData> {
        self.behaviors.iter().find(|b| b.name == name)
    }

    /// First behavior name that appears more than once, if any.
    pub(crate) fn duplicate_behavior(&self) -> Option<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.behaviors
            .iter()
            .map(|b| b.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// A whole scene: configuration plus the objects to spawn, in order.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneData {
    pub config:  SceneConfig,
    pub objects: Vec<ObjectData>,
}

impl SceneData {
    /// Parse and validate scene JSON.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.config.validate()?;
        Ok(data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
