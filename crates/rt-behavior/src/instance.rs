//! One behavior attached to one entity: identity, activation state machine
//! and the profiled stepping contract.

use std::any::Any;

use log::debug;

use rt_core::{BehaviorHandle, EntityId, EntityState, NameId};

use crate::profiler::{ProfileSpan, Profiler};
use crate::{Behavior, BehaviorData, BehaviorResult, SceneContext};

/// A behavior of some registered kind, attached to its owner entity.
///
/// # Activation
///
/// Two states, `ACTIVE` (initial) and `INACTIVE`, changed only through
/// [`activate`](Self::activate).  `on_activate` / `on_deactivate` fire exactly
/// once per genuine transition; asking for the current state is a no-op.
///
/// # Stepping
///
/// [`step_pre_events`](Self::step_pre_events) and
/// [`step_post_events`](Self::step_post_events) do nothing while inactive.
/// Otherwise they open a profiling span named after the behavior, run the
/// kind's `do_step_*` hook, and close the span when the guard drops, which
/// also happens when the hook returns `Err` or panics.
///
/// # Lifecycle
///
/// `on_created` and `on_destroy` are forwarded at most once each.
/// Deactivation never counts as destruction.
pub struct BehaviorInstance {
    name:      String,
    name_id:   NameId,
    type_name: String,
    owner:     EntityId,
    activated: bool,
    data:      BehaviorData,
    created:   bool,
    destroyed: bool,
    behavior:  Box<dyn Behavior>,
}

impl BehaviorInstance {
    /// Wrap a freshly built behavior.  `on_created` has not fired yet.
    ///
    /// `name_id` must be the interned form of `data.name`.
    pub fn new(
        data:     BehaviorData,
        owner:    EntityId,
        name_id:  NameId,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            name:      data.name.clone(),
            name_id,
            type_name: data.type_name.clone(),
            owner,
            activated: true,
            data,
            created:   false,
            destroyed: false,
            behavior,
        }
    }

    // ── Identity ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_id(&self) -> NameId {
        self.name_id
    }

    /// The type name this instance was declared with.  For an unregistered
    /// type this is still the declared name, even though the instance runs
    /// [`DefaultBehavior`][crate::DefaultBehavior].
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn handle(&self) -> BehaviorHandle {
        BehaviorHandle::new(self.owner, self.name_id)
    }

    /// The configuration currently applied (updated by a successful
    /// [`update_from_behavior_data`](Self::update_from_behavior_data)).
    pub fn data(&self) -> &BehaviorData {
        &self.data
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ── Typed access to the concrete kind ─────────────────────────────────

    pub fn downcast_ref<T: Behavior>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.behavior;
        any.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = &mut *self.behavior;
        any.downcast_mut::<T>()
    }

    // ── Activation state machine ──────────────────────────────────────────

    pub fn activated(&self) -> bool {
        self.activated
    }

    /// Move to `ACTIVE` (`enable = true`) or `INACTIVE` (`enable = false`).
    pub fn activate(&mut self, enable: bool, owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        debug_assert_eq!(owner.id, self.owner, "behavior stepped with a foreign owner");
        match (self.activated, enable) {
            (false, true) => {
                self.activated = true;
                self.behavior.on_activate(owner, ctx);
            }
            (true, false) => {
                self.activated = false;
                self.behavior.on_deactivate(owner, ctx);
            }
            _ => {}
        }
    }

    // ── Per-frame stepping ────────────────────────────────────────────────

    pub fn step_pre_events(
        &mut self,
        owner:    &mut EntityState,
        ctx:      &mut SceneContext<'_>,
        profiler: Option<&mut dyn Profiler>,
    ) -> BehaviorResult<()> {
        if !self.activated {
            return Ok(());
        }
        debug_assert_eq!(owner.id, self.owner, "behavior stepped with a foreign owner");
        let _span = ProfileSpan::open(profiler, &self.name);
        self.behavior.do_step_pre_events(owner, ctx)
    }

    pub fn step_post_events(
        &mut self,
        owner:    &mut EntityState,
        ctx:      &mut SceneContext<'_>,
        profiler: Option<&mut dyn Profiler>,
    ) -> BehaviorResult<()> {
        if !self.activated {
            return Ok(());
        }
        debug_assert_eq!(owner.id, self.owner, "behavior stepped with a foreign owner");
        let _span = ProfileSpan::open(profiler, &self.name);
        self.behavior.do_step_post_events(owner, ctx)
    }

    // ── Lifecycle and hot-reload ──────────────────────────────────────────

    /// Fire `on_created`.  Later calls are ignored.
    pub fn on_created(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        if self.created || self.destroyed {
            return Ok(());
        }
        self.created = true;
        debug!("behavior `{}` ({}) created on {}", self.name, self.type_name, self.owner);
        self.behavior.on_created(owner, ctx)
    }

    /// Fire `on_destroy`.  Later calls are ignored.
    pub fn on_destroy(&mut self, owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        debug!("behavior `{}` ({}) destroyed on {}", self.name, self.type_name, self.owner);
        self.behavior.on_destroy(owner, ctx);
    }

    pub fn on_object_hot_reloaded(&mut self, owner: &mut EntityState, ctx: &mut SceneContext<'_>) {
        self.behavior.on_object_hot_reloaded(owner, ctx);
    }

    /// Offer `new` to the kind as an in-place patch of the stored data.
    ///
    /// Returns the kind's answer.  On `true` the stored data becomes `new`;
    /// on `false` nothing changes and the caller must destroy this instance
    /// and build a replacement from `new`.
    pub fn update_from_behavior_data(&mut self, new: &BehaviorData) -> bool {
        let applied = self.behavior.update_from_behavior_data(&self.data, new);
        if applied {
            self.data = new.clone();
        }
        applied
    }
}

impl std::fmt::Debug for BehaviorInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorInstance")
            .field("name", &self.name)
            .field("name_id", &self.name_id)
            .field("type_name", &self.type_name)
            .field("owner", &self.owner)
            .field("activated", &self.activated)
            .finish_non_exhaustive()
    }
}
