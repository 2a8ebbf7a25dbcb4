//! Applying edited object data and re-registered behavior kinds to a live scene.

use log::{debug, error, info};

use rt_behavior::{BehaviorData, BehaviorInstance, BehaviorResult, SceneContext};
use rt_core::{EntityId, EntityState};

use crate::scene::slot_mut;
use crate::{ObjectData, Runtime, Scene, SceneError, SceneResult};

/// What a hot reload did to the scene's behaviors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HotReloadReport {
    /// Patched in place through `update_from_behavior_data`.
    pub updated:   usize,
    /// Destroyed and rebuilt in the same attachment slot.
    pub recreated: usize,
    /// Newly attached.
    pub added:     usize,
    /// Destroyed and detached.
    pub removed:   usize,
    /// Names of behaviors whose `on_created` failed.  Each was destroyed
    /// again and is no longer attached.
    pub failed:    Vec<String>,
}

impl Scene {
    /// Bring a live object in line with its edited data.
    ///
    /// Behaviors are matched by name between `old` and `new`:
    /// - present only in `old`: destroyed and detached;
    /// - present in both with different data: offered to
    ///   `update_from_behavior_data`, and destroyed then rebuilt in the same
    ///   slot if the kind declines or the type changed;
    /// - present only in `new`: created, appended, then `on_created`.
    ///
    /// Geometry fields that differ between `old` and `new` are then copied to
    /// the entity, and every attached behavior gets `on_object_hot_reloaded`.
    /// A rebuilt behavior keeps the activation state of the one it replaces.
    ///
    /// A new or rebuilt behavior whose `on_created` fails is destroyed,
    /// detached and listed in [`HotReloadReport::failed`]; the reload goes on.
    pub fn hot_reload_object(
        &mut self,
        rt:  &mut Runtime,
        id:  EntityId,
        old: &ObjectData,
        new: &ObjectData,
    ) -> SceneResult<HotReloadReport> {
        if let Some(name) = new.duplicate_behavior() {
            return Err(SceneError::DuplicateBehavior {
                object:   new.name.clone(),
                behavior: name.to_owned(),
            });
        }

        let frame = self.clock.current_frame;
        let delta_secs = self.clock.delta_secs();
        let entity = slot_mut(&mut self.entities, id)?;
        let mut report = HotReloadReport::default();

        // ── Removed ───────────────────────────────────────────────────────
        for old_b in &old.behaviors {
            if new.behavior(&old_b.name).is_some() {
                continue;
            }
            if let Some(i) = entity.position_of(&old_b.name) {
                let mut b = entity.behaviors.remove(i);
                let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, &mut entity.rng);
                b.on_destroy(&mut entity.state, &mut ctx);
                report.removed += 1;
            }
        }

        // ── Changed / added ───────────────────────────────────────────────
        for new_b in &new.behaviors {
            match (old.behavior(&new_b.name), entity.position_of(&new_b.name)) {
                (Some(old_b), Some(i)) => {
                    if old_b == new_b {
                        continue;
                    }
                    let patched = old_b.type_name == new_b.type_name
                        && entity.behaviors[i].update_from_behavior_data(new_b);
                    if patched {
                        report.updated += 1;
                        continue;
                    }

                    let fresh = rt.registry.create(new_b, &entity.state, &self.resources, &mut rt.names);
                    let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, &mut entity.rng);
                    match replace_at(&mut entity.behaviors, i, fresh, &mut entity.state, &mut ctx) {
                        Ok(()) => report.recreated += 1,
                        Err(e) => {
                            error!("hot-reload `{}`: rebuilt behavior `{}` failed on_created: {e}", new.name, new_b.name);
                            report.failed.push(new_b.name.clone());
                        }
                    }
                }
                (_, None) => {
                    let mut b = rt.registry.create(new_b, &entity.state, &self.resources, &mut rt.names);
                    let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, &mut entity.rng);
                    match b.on_created(&mut entity.state, &mut ctx) {
                        Ok(()) => {
                            entity.behaviors.push(b);
                            report.added += 1;
                        }
                        Err(e) => {
                            error!("hot-reload `{}`: added behavior `{}` failed on_created: {e}", new.name, new_b.name);
                            b.on_destroy(&mut entity.state, &mut ctx);
                            report.failed.push(new_b.name.clone());
                        }
                    }
                }
                // Attached at runtime under a name the old data did not know:
                // leave it alone.
                (None, Some(_)) => {}
            }
        }

        // ── Geometry ──────────────────────────────────────────────────────
        apply_geometry(&mut entity.state, old, new);

        let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, &mut entity.rng);
        for b in entity.behaviors.iter_mut() {
            b.on_object_hot_reloaded(&mut entity.state, &mut ctx);
        }

        debug!("hot-reload `{}` ({id}): {report:?}", new.name);
        Ok(report)
    }

    /// Rebuild every instance of `type_name` from its stored data.
    ///
    /// Call after registering a new factory for the type.  Each old instance
    /// is destroyed, and its replacement is created in the same slot, fired
    /// `on_created` and given the old activation state.  Replacements that
    /// fail `on_created` are destroyed and detached, as in
    /// [`hot_reload_object`](Self::hot_reload_object).
    pub fn reload_behavior_type(&mut self, rt: &mut Runtime, type_name: &str) -> HotReloadReport {
        let frame = self.clock.current_frame;
        let delta_secs = self.clock.delta_secs();
        let mut report = HotReloadReport::default();

        for entity in self.entities.iter_mut().flatten() {
            let mut i = 0;
            while i < entity.behaviors.len() {
                if entity.behaviors[i].type_name() != type_name {
                    i += 1;
                    continue;
                }
                let data: BehaviorData = entity.behaviors[i].data().clone();
                let fresh = rt.registry.create(&data, &entity.state, &self.resources, &mut rt.names);
                let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, &mut entity.rng);
                match replace_at(&mut entity.behaviors, i, fresh, &mut entity.state, &mut ctx) {
                    Ok(()) => {
                        report.recreated += 1;
                        i += 1;
                    }
                    // The slot is gone; `i` now names the next behavior.
                    Err(e) => {
                        error!("reload `{type_name}`: `{}` on `{}` failed on_created: {e}", data.name, entity.state.name);
                        report.failed.push(data.name);
                    }
                }
            }
        }

        info!(
            "reloaded {} instance(s) of behavior type `{type_name}`, {} failed",
            report.recreated,
            report.failed.len(),
        );
        report
    }
}

/// Destroy `behaviors[i]`, put `fresh` in its place and create it.
///
/// If `fresh` fails `on_created` it is destroyed and removed, so the slot
/// disappears.
fn replace_at(
    behaviors: &mut Vec<BehaviorInstance>,
    i:         usize,
    fresh:     BehaviorInstance,
    owner:     &mut EntityState,
    ctx:       &mut SceneContext<'_>,
) -> BehaviorResult<()> {
    let was_active = behaviors[i].activated();
    let mut old = std::mem::replace(&mut behaviors[i], fresh);
    old.on_destroy(owner, ctx);

    if let Err(e) = behaviors[i].on_created(owner, ctx) {
        let mut failed = behaviors.remove(i);
        failed.on_destroy(owner, ctx);
        return Err(e);
    }
    if !was_active {
        behaviors[i].activate(false, owner, ctx);
    }
    Ok(())
}

fn apply_geometry(state: &mut EntityState, old: &ObjectData, new: &ObjectData) {
    if old.x != new.x {
        state.x = new.x;
    }
    if old.y != new.y {
        state.y = new.y;
    }
    if old.width != new.width {
        state.width = new.width;
    }
    if old.height != new.height {
        state.height = new.height;
    }
    if old.angle != new.angle {
        state.angle = new.angle;
    }
}
