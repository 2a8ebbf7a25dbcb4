//! Type-name → factory registry used by entity construction and hot-reload.

use log::{debug, warn};
use rustc_hash::FxHashMap;

use rt_core::{BehaviorHandle, EntityState, NameInterner, Resources};

use crate::{Behavior, BehaviorData, BehaviorInstance, DefaultBehavior, Mover, Wander};

/// Everything a factory may read while building a behavior.
pub struct FactoryContext<'a> {
    /// The declarative configuration, including kind-specific fields.
    pub data: &'a BehaviorData,

    /// The owner as it stands at construction time.
    pub owner: &'a EntityState,

    /// Back-reference the new behavior will be addressable by.
    pub handle: BehaviorHandle,

    /// Scene-wide services.  Read-only: side effects belong in `on_created`.
    pub resources: &'a Resources,
}

/// Builds one behavior of a registered kind.
pub type BehaviorFactory = Box<dyn Fn(&FactoryContext<'_>) -> Box<dyn Behavior>>;

/// Maps behavior type names to factories.
///
/// Constructed once while loading the game (and its extensions) and then
/// passed by reference to scene construction and hot-reload.  The empty type
/// name always resolves: [`new`](Self::new) registers [`DefaultBehavior`]
/// under it, and unknown names fall back to that entry.
///
/// The registry does no locking.  Mutate it only between frames.
pub struct BehaviorRegistry {
    factories: FxHashMap<String, BehaviorFactory>,
}

impl BehaviorRegistry {
    /// Registry holding only the default (empty-name) kind.
    pub fn new() -> Self {
        let mut registry = Self { factories: FxHashMap::default() };
        registry.register("", |_| Box::new(DefaultBehavior));
        registry
    }

    /// Registry with the default kind plus `Mover` and `Wander`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Mover::TYPE_NAME, |f| Box::new(Mover::from_data(f.data)));
        registry.register(Wander::TYPE_NAME, |f| Box::new(Wander::from_data(f.data)));
        registry
    }

    /// Install or replace the factory for `type_name`.
    ///
    /// Returns `true` if an earlier factory was replaced; the last
    /// registration wins.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&FactoryContext<'_>) -> Box<dyn Behavior> + 'static,
    {
        let type_name = type_name.into();
        let replaced = self.factories.insert(type_name.clone(), Box::new(factory)).is_some();
        debug!(
            "registry: {} behavior type `{type_name}`",
            if replaced { "replaced" } else { "registered" },
        );
        replaced
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names in ascending order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build an instance for `owner` from `data`.
    ///
    /// Looks up `data.type_name`; if it is not registered, falls back to the
    /// empty-name factory.  Never fails.  `on_created` is not fired; the
    /// caller does that once the instance is attached.
    pub fn create(
        &self,
        data:      &BehaviorData,
        owner:     &EntityState,
        resources: &Resources,
        names:     &mut NameInterner,
    ) -> BehaviorInstance {
        let name_id = names.intern(&data.name);
        let ctx = FactoryContext {
            data,
            owner,
            handle: BehaviorHandle::new(owner.id, name_id),
            resources,
        };

        let factory = match self.factories.get(data.type_name.as_str()) {
            Some(f) => Some(f),
            None => {
                warn!(
                    "registry: behavior type `{}` (behavior `{}` on `{}`) is not registered; \
                     using the default behavior",
                    data.type_name, data.name, owner.name,
                );
                self.factories.get("")
            }
        };
        let behavior = match factory {
            Some(f) => f(&ctx),
            None => Box::new(DefaultBehavior),
        };

        BehaviorInstance::new(data.clone(), owner.id, name_id, behavior)
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
