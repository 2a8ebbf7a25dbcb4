//! Game-wide services shared by every scene.

use rt_behavior::BehaviorRegistry;
use rt_core::NameInterner;
use rt_spatial::register_spatial_behaviors;

/// The behavior registry and the name interner, owned together.
///
/// Built once while loading the game and passed by `&mut` to scene
/// construction, stepping and hot-reload.  Register extension kinds on
/// `registry` before spawning objects that use them.
pub struct Runtime {
    pub registry: BehaviorRegistry,
    pub names:    NameInterner,
}

impl Runtime {
    /// Runtime with every built-in behavior kind registered.
    pub fn new() -> Self {
        let mut registry = BehaviorRegistry::with_builtins();
        register_spatial_behaviors(&mut registry);
        Self::with_registry(registry)
    }

    pub fn with_registry(registry: BehaviorRegistry) -> Self {
        Self { registry, names: NameInterner::new() }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
