//! Fluent builder for constructing a [`Scene`].

use rt_behavior::FrameProfiler;
use rt_core::{Resources, SceneConfig};
use rt_spatial::BoundsIndex;

use crate::{ObjectData, Runtime, Scene, SceneResult};

/// Fluent builder for [`Scene`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                           |
/// |---------------------------|-----------------------------------|
/// | `.resources(r)`           | Empty `Resources`                 |
/// | `.without_bounds_index()` | A `BoundsIndex` is inserted       |
/// | `.object(o)` / `.objects` | No objects                        |
///
/// # Example
///
/// ```rust,ignore
/// let mut rt = Runtime::new();
/// let mut scene = SceneBuilder::new(config)
///     .object(ObjectData::new("hero").sized(32.0, 32.0))
///     .build(&mut rt)?;
/// ```
pub struct SceneBuilder {
    config:       SceneConfig,
    resources:    Resources,
    bounds_index: bool,
    objects:      Vec<ObjectData>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            resources:    Resources::new(),
            bounds_index: true,
            objects:      Vec::new(),
        }
    }

    /// Supply pre-populated scene resources.
    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Do not insert a `BoundsIndex`.  `BoundsTracker` then only keeps its
    /// cache, and `NearestPicker` steps fail.
    pub fn without_bounds_index(mut self) -> Self {
        self.bounds_index = false;
        self
    }

    pub fn object(mut self, object: ObjectData) -> Self {
        self.objects.push(object);
        self
    }

    pub fn objects(mut self, objects: impl IntoIterator<Item = ObjectData>) -> Self {
        self.objects.extend(objects);
        self
    }

    /// Validate the configuration, set up resources and spawn the objects in
    /// order (their ids are `0..n`).
    pub fn build(self, rt: &mut Runtime) -> SceneResult<Scene> {
        self.config.validate()?;

        let mut resources = self.resources;
        if self.bounds_index && !resources.contains::<BoundsIndex>() {
            resources.insert(BoundsIndex::new());
        }

        let mut scene = Scene {
            clock:     self.config.make_clock(),
            profiler:  self.config.profiling.then(FrameProfiler::new),
            config:    self.config,
            resources,
            entities:  Vec::with_capacity(self.objects.len()),
        };
        for object in &self.objects {
            scene.spawn(rt, object)?;
        }
        Ok(scene)
    }
}
