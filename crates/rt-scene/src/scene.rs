//! The `Scene` struct and its frame loop.

use log::{debug, error};

use rt_behavior::{BehaviorInstance, FrameProfiler, Profiler, SceneContext};
use rt_core::{EntityId, EntityRng, EntityState, Frame, FrameClock, Resources, SceneConfig};
use rt_spatial::BoundsIndex;

use crate::{
    EventSheet, ObjectData, Runtime, SceneBuilder, SceneData, SceneError, SceneObserver, SceneResult,
};

// ── Entity ────────────────────────────────────────────────────────────────────

/// One live object: its geometry, its RNG, and its behaviors in attachment
/// order.
pub struct Entity {
    pub state:            EntityState,
    pub(crate) rng:       EntityRng,
    pub(crate) behaviors: Vec<BehaviorInstance>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.state.id
    }

    pub fn behaviors(&self) -> &[BehaviorInstance] {
        &self.behaviors
    }

    pub fn behavior(&self, name: &str) -> Option<&BehaviorInstance> {
        self.behaviors.iter().find(|b| b.name() == name)
    }

    pub(crate) fn position_of(&self, name: &str) -> Option<usize> {
        self.behaviors.iter().position(|b| b.name() == name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    PreEvents,
    PostEvents,
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// The scene runner.
///
/// Owns an arena of entities indexed by [`EntityId`]; removed slots stay
/// empty and ids are never reused.  Drives the two behavior phases around the
/// event sheet each frame.
///
/// Create via [`SceneBuilder`][crate::SceneBuilder] or [`Scene::from_data`].
pub struct Scene {
    pub config: SceneConfig,

    pub clock: FrameClock,

    /// Scene-wide services handed to every hook; holds the `BoundsIndex`.
    pub resources: Resources,

    pub(crate) entities: Vec<Option<Entity>>,

    pub(crate) profiler: Option<FrameProfiler>,
}

impl Scene {
    /// Build a scene from loaded data with the default resources.
    pub fn from_data(rt: &mut Runtime, data: &SceneData) -> SceneResult<Self> {
        SceneBuilder::new(data.config.clone())
            .objects(data.objects.iter().cloned())
            .build(rt)
    }

    // ── Entities ──────────────────────────────────────────────────────────

    /// Spawn an object from its data.
    ///
    /// Behaviors are created in declared order, then `on_created` fires on
    /// each in the same order.  If one of them fails, the behaviors created
    /// so far are destroyed and the object is not spawned.
    pub fn spawn(&mut self, rt: &mut Runtime, data: &ObjectData) -> SceneResult<EntityId> {
        if let Some(name) = data.duplicate_behavior() {
            return Err(SceneError::DuplicateBehavior {
                object:   data.name.clone(),
                behavior: name.to_owned(),
            });
        }

        let id = EntityId::try_from(self.entities.len())
            .map_err(|_| rt_core::CoreError::Config("entity arena is full".into()))?;
        let name_id = rt.names.intern(&data.name);
        let mut state = EntityState::new(id, data.name.as_str(), name_id)
            .with_rect(data.x, data.y, data.width, data.height);
        state.angle = data.angle;
        let mut rng = EntityRng::new(self.config.seed, id);

        let mut behaviors = Vec::with_capacity(data.behaviors.len());
        for b in &data.behaviors {
            behaviors.push(rt.registry.create(b, &state, &self.resources, &mut rt.names));
        }

        let mut ctx = SceneContext::new(
            self.clock.current_frame,
            self.clock.delta_secs(),
            &mut self.resources,
            &mut rng,
        );
        for i in 0..behaviors.len() {
            if let Err(e) = behaviors[i].on_created(&mut state, &mut ctx) {
                error!("spawn `{}`: behavior `{}` failed on_created: {e}", data.name, behaviors[i].name());
                for b in behaviors[..=i].iter_mut() {
                    b.on_destroy(&mut state, &mut ctx);
                }
                return Err(e.into());
            }
        }

        debug!("scene: spawned `{}` as {id} with {} behaviors", data.name, behaviors.len());
        self.entities.push(Some(Entity { state, rng, behaviors }));
        Ok(id)
    }

    /// Destroy every behavior of `id` in attachment order, then free its slot.
    ///
    /// Returns the entity's final state.
    pub fn remove_entity(&mut self, id: EntityId) -> SceneResult<EntityState> {
        let mut entity = self
            .entities
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(SceneError::EntityNotFound(id))?;

        let Entity { state, rng, behaviors } = &mut entity;
        let mut ctx = SceneContext::new(
            self.clock.current_frame,
            self.clock.delta_secs(),
            &mut self.resources,
            rng,
        );
        for b in behaviors.iter_mut() {
            b.on_destroy(state, &mut ctx);
        }
        debug!("scene: removed {id}");
        Ok(entity.state)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable access to an entity's geometry.  Behaviors are not notified.
    pub fn state_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.entities
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .map(|e| &mut e.state)
    }

    /// Live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().flatten()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().next().is_none()
    }

    // ── Behaviors ─────────────────────────────────────────────────────────

    pub fn behavior(&self, entity: EntityId, name: &str) -> SceneResult<&BehaviorInstance> {
        self.entity(entity)
            .ok_or(SceneError::EntityNotFound(entity))?
            .behavior(name)
            .ok_or_else(|| SceneError::BehaviorNotFound { entity, behavior: name.to_owned() })
    }

    /// Activate or deactivate one behavior, firing its transition hook.
    pub fn activate_behavior(&mut self, entity: EntityId, name: &str, enable: bool) -> SceneResult<()> {
        let frame = self.clock.current_frame;
        let delta_secs = self.clock.delta_secs();
        let e = slot_mut(&mut self.entities, entity)?;
        let i = e
            .position_of(name)
            .ok_or_else(|| SceneError::BehaviorNotFound { entity, behavior: name.to_owned() })?;

        let Entity { state, rng, behaviors } = e;
        let mut ctx = SceneContext::new(frame, delta_secs, &mut self.resources, rng);
        behaviors[i].activate(enable, state, &mut ctx);
        Ok(())
    }

    // ── Services ──────────────────────────────────────────────────────────

    /// The aggregating profiler, present when `config.profiling` is set.
    pub fn profiler(&self) -> Option<&FrameProfiler> {
        self.profiler.as_ref()
    }

    pub fn bounds_index(&self) -> Option<&BoundsIndex> {
        BoundsIndex::from_resources(&self.resources).ok()
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run until `config.end_frame()`.
    pub fn run<E, O>(&mut self, rt: &mut Runtime, events: &mut E, observer: &mut O)
    where
        E: EventSheet + ?Sized,
        O: SceneObserver + ?Sized,
    {
        while self.clock.current_frame < self.config.end_frame() {
            self.step_frame(rt, events, observer);
        }
        observer.on_scene_end(self.clock.current_frame);
    }

    /// Run exactly `n` frames from the current one (ignores `total_frames`).
    pub fn run_frames<E, O>(&mut self, n: u64, rt: &mut Runtime, events: &mut E, observer: &mut O)
    where
        E: EventSheet + ?Sized,
        O: SceneObserver + ?Sized,
    {
        for _ in 0..n {
            self.step_frame(rt, events, observer);
        }
    }

    /// Pre-events, events, post-events, then advance the clock.
    ///
    /// Returns the number of behavior steps run.
    pub fn step_frame<E, O>(&mut self, rt: &mut Runtime, events: &mut E, observer: &mut O) -> usize
    where
        E: EventSheet + ?Sized,
        O: SceneObserver + ?Sized,
    {
        let now = self.clock.current_frame;
        observer.on_frame_start(now);

        let mut stepped = self.step_phase(Phase::PreEvents, now, observer);
        events.run_events(self, rt, now);
        stepped += self.step_phase(Phase::PostEvents, now, observer);

        observer.on_frame_end(now, stepped);
        self.clock.advance();
        stepped
    }

    /// Step every activated behavior of every live entity.
    ///
    /// Entities in ascending id order, behaviors in attachment order.  Each
    /// step sees the geometry left by the ones before it.
    fn step_phase<O>(&mut self, phase: Phase, now: Frame, observer: &mut O) -> usize
    where
        O: SceneObserver + ?Sized,
    {
        let delta_secs = self.clock.delta_secs();
        let mut stepped = 0;

        for entity in self.entities.iter_mut().flatten() {
            let Entity { state, rng, behaviors } = entity;
            let mut ctx = SceneContext::new(now, delta_secs, &mut self.resources, rng);

            for b in behaviors.iter_mut() {
                if !b.activated() {
                    continue;
                }
                let profiler = self.profiler.as_mut().map(|p| p as &mut dyn Profiler);
                let result = match phase {
                    Phase::PreEvents  => b.step_pre_events(state, &mut ctx, profiler),
                    Phase::PostEvents => b.step_post_events(state, &mut ctx, profiler),
                };
                stepped += 1;

                if let Err(e) = result {
                    error!("{now}: {phase:?} step of `{}` on `{}` failed: {e}", b.name(), state.name);
                    observer.on_behavior_error(now, b.handle(), &e);
                }
            }
        }
        stepped
    }
}

/// Borrow only the arena, so callers can still reach the other scene fields.
pub(crate) fn slot_mut(entities: &mut [Option<Entity>], id: EntityId) -> SceneResult<&mut Entity> {
    entities
        .get_mut(id.index())
        .and_then(Option::as_mut)
        .ok_or(SceneError::EntityNotFound(id))
}
