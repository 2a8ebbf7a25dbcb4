//! Behavior kind that keeps its owner's bounds current in the `BoundsIndex`.

use log::debug;

use rt_behavior::{Behavior, BehaviorData, BehaviorResult, SceneContext};
use rt_core::{BehaviorHandle, EntityState, Resources};

use crate::{BoundsIndex, SpatialBoundsCache};

/// Owns one [`SpatialBoundsCache`] and its entry in the scene's index.
///
/// | Hook                      | Index effect                                 |
/// |---------------------------|----------------------------------------------|
/// | `on_created`              | insert                                       |
/// | `do_step_post_events`     | if the owner moved: remove, resync, insert   |
/// | `on_object_hot_reloaded`  | same as post-events                          |
/// | `on_deactivate`           | remove                                       |
/// | `on_activate`             | resync, insert                               |
/// | `on_destroy`              | remove                                       |
///
/// Without a `BoundsIndex` resource the cache is still kept in sync, it just
/// isn't stored anywhere.
pub struct BoundsTracker {
    cache:   SpatialBoundsCache,
    indexed: bool,
    resyncs: u64,
}

impl BoundsTracker {
    pub const TYPE_NAME: &'static str = "BoundsTracker";

    pub fn new(handle: BehaviorHandle, owner: &EntityState) -> Self {
        Self {
            cache:   SpatialBoundsCache::new(handle, owner),
            indexed: false,
            resyncs: 0,
        }
    }

    pub fn cache(&self) -> &SpatialBoundsCache {
        &self.cache
    }

    /// `true` while the cache is stored in the scene's index.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Number of resynchronizations caused by owner movement.
    pub fn resync_count(&self) -> u64 {
        self.resyncs
    }

    fn insert(&mut self, resources: &mut Resources) {
        if self.indexed {
            return;
        }
        match BoundsIndex::from_resources_mut(resources) {
            Ok(index) => {
                index.insert(self.cache);
                self.indexed = true;
            }
            Err(e) => debug!("bounds tracker {}: {e}; not indexed", self.cache.owner()),
        }
    }

    fn remove(&mut self, resources: &mut Resources) {
        if !self.indexed {
            return;
        }
        if let Ok(index) = BoundsIndex::from_resources_mut(resources) {
            index.remove(&self.cache);
        }
        self.indexed = false;
    }

    /// Resynchronize if the owner's box changed, replacing the index entry.
    fn sync(&mut self, owner: &EntityState, resources: &mut Resources) {
        if !self.cache.is_stale(owner) {
            return;
        }
        let old = self.cache;
        self.cache.resynchronize(owner);
        self.resyncs += 1;
        if self.indexed {
            if let Ok(index) = BoundsIndex::from_resources_mut(resources) {
                index.replace(&old, self.cache);
            }
        }
    }
}

impl Behavior for BoundsTracker {
    fn on_created(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        self.sync(owner, ctx.resources);
        self.insert(ctx.resources);
        Ok(())
    }

    fn do_step_post_events(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        self.sync(owner, ctx.resources);
        Ok(())
    }

    fn on_activate(&mut self, owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        self.cache.resynchronize(owner);
        self.insert(ctx.resources);
    }

    fn on_deactivate(&mut self, _owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        self.remove(ctx.resources);
    }

    fn on_destroy(&mut self, _owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        self.remove(ctx.resources);
    }

    fn on_object_hot_reloaded(&mut self, owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        self.sync(owner, ctx.resources);
    }

    /// Nothing to patch: the tracker has no configuration of its own.
    fn update_from_behavior_data(&mut self, _old: &BehaviorData, _new: &BehaviorData) -> bool {
        true
    }
}
