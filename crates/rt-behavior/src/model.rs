//! The `Behavior` trait, the extension point for user-defined kinds.

use std::any::Any;

use rt_core::EntityState;

use crate::{BehaviorData, BehaviorResult, SceneContext};

/// Pluggable per-entity logic.
///
/// Implement this trait to define a behavior kind, then register a factory
/// for it in a [`BehaviorRegistry`][crate::BehaviorRegistry].  Every hook has
/// a no-op default, so a kind only overrides what it needs.
///
/// Hooks are never called directly by the scene: it goes through
/// [`BehaviorInstance`][crate::BehaviorInstance], which owns the activation
/// state, guarantees `on_created`/`on_destroy` fire at most once, and wraps
/// the two `do_step_*` hooks in a profiling span.
///
/// Every hook receives the owner entity's state (`owner`) and the scene
/// context.  The owner is guaranteed alive for the duration of the call.
///
/// # Example
///
/// ```rust
/// use rt_behavior::{Behavior, BehaviorResult, SceneContext};
/// use rt_core::EntityState;
///
/// struct Fall { speed: f32 }
///
/// impl Behavior for Fall {
///     fn do_step_pre_events(
///         &mut self,
///         owner: &mut EntityState,
///         ctx:   &mut SceneContext<'_>,
///     ) -> BehaviorResult<()> {
///         owner.y += self.speed * ctx.delta_secs;
///         Ok(())
///     }
/// }
/// ```
pub trait Behavior: Any {
    /// Called once after the owner is fully constructed.
    fn on_created(
        &mut self,
        _owner: &mut EntityState,
        _ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        Ok(())
    }

    /// Work done every frame before the event sheet runs.
    fn do_step_pre_events(
        &mut self,
        _owner: &mut EntityState,
        _ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        Ok(())
    }

    /// Work done every frame after the event sheet ran.
    fn do_step_post_events(
        &mut self,
        _owner: &mut EntityState,
        _ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        Ok(())
    }

    /// Called on a genuine INACTIVE → ACTIVE transition only.
    fn on_activate(&mut self, _owner: &mut EntityState, _ctx: &mut SceneContext<'_>) {}

    /// Called on a genuine ACTIVE → INACTIVE transition only.
    ///
    /// Deactivation is not destruction: `on_destroy` is not called.
    fn on_deactivate(&mut self, _owner: &mut EntityState, _ctx: &mut SceneContext<'_>) {}

    /// Called once before the behavior is torn down, either because its owner
    /// is removed from the scene or because hot-reload detached it.
    fn on_destroy(&mut self, _owner: &mut EntityState, _ctx: &mut SceneContext<'_>) {}

    /// The owner's position, angle or size may have changed outside of normal
    /// game logic (editor hot-reload).  Resynchronize any cached geometry.
    fn on_object_hot_reloaded(&mut self, _owner: &mut EntityState, _ctx: &mut SceneContext<'_>) {}

    /// Apply changed configuration in place during hot-reload.
    ///
    /// Return `true` only if `new` was fully applied.  The default returns
    /// `false`, telling the caller to destroy this instance and recreate it
    /// from `new`.
    fn update_from_behavior_data(&mut self, _old: &BehaviorData, _new: &BehaviorData) -> bool {
        false
    }
}
