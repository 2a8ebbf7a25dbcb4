//! Unit tests for rt-behavior.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rt_core::{EntityId, EntityRng, EntityState, Frame, NameInterner, Resources};

use crate::{
    Behavior, BehaviorData, BehaviorError, BehaviorInstance, BehaviorRegistry, BehaviorResult,
    Profiler, SceneContext,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Owner, resources and RNG for driving one instance by hand.
struct Fixture {
    owner:     EntityState,
    resources: Resources,
    rng:       EntityRng,
    names:     NameInterner,
}

impl Fixture {
    fn new() -> Self {
        let mut names = NameInterner::new();
        let name_id = names.intern("hero");
        Self {
            owner:     EntityState::new(EntityId(0), "hero", name_id).with_rect(0.0, 0.0, 10.0, 10.0),
            resources: Resources::new(),
            rng:       EntityRng::new(1, EntityId(0)),
            names,
        }
    }

    /// Split into the owner and a half-second-frame context.
    fn split(&mut self) -> (&mut EntityState, SceneContext<'_>) {
        (
            &mut self.owner,
            SceneContext::new(Frame(0), 0.5, &mut self.resources, &mut self.rng),
        )
    }

    fn create(&mut self, registry: &BehaviorRegistry, data: &BehaviorData) -> BehaviorInstance {
        registry.create(data, &self.owner, &self.resources, &mut self.names)
    }
}

#[derive(Clone, Default)]
struct Counters {
    created:     Arc<AtomicUsize>,
    destroyed:   Arc<AtomicUsize>,
    activated:   Arc<AtomicUsize>,
    deactivated: Arc<AtomicUsize>,
    pre:         Arc<AtomicUsize>,
    post:        Arc<AtomicUsize>,
    hot:         Arc<AtomicUsize>,
}

fn get(c: &Arc<AtomicUsize>) -> usize {
    c.load(Ordering::SeqCst)
}

fn bump(c: &Arc<AtomicUsize>) {
    c.fetch_add(1, Ordering::SeqCst);
}

#[derive(Clone, Copy, PartialEq)]
enum PreOutcome {
    Ok,
    Fail,
    Panic,
}

/// Counts every hook invocation.
struct Probe {
    counters: Counters,
    pre:      PreOutcome,
}

impl Behavior for Probe {
    fn on_created(&mut self, _: &mut EntityState, _: &mut SceneContext<'_>) -> BehaviorResult<()> {
        bump(&self.counters.created);
        Ok(())
    }

    fn do_step_pre_events(
        &mut self,
        _: &mut EntityState,
        _: &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        bump(&self.counters.pre);
        match self.pre {
            PreOutcome::Ok => Ok(()),
            PreOutcome::Fail => Err(BehaviorError::hook("counting", "pre failed")),
            PreOutcome::Panic => panic!("counting pre panicked"),
        }
    }

    fn do_step_post_events(
        &mut self,
        _: &mut EntityState,
        _: &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        bump(&self.counters.post);
        Ok(())
    }

    fn on_activate(&mut self, _: &mut EntityState, _: &mut SceneContext<'_>) {
        bump(&self.counters.activated);
    }

    fn on_deactivate(&mut self, _: &mut EntityState, _: &mut SceneContext<'_>) {
        bump(&self.counters.deactivated);
    }

    fn on_destroy(&mut self, _: &mut EntityState, _: &mut SceneContext<'_>) {
        bump(&self.counters.destroyed);
    }

    fn on_object_hot_reloaded(&mut self, _: &mut EntityState, _: &mut SceneContext<'_>) {
        bump(&self.counters.hot);
    }
}

fn counting_registry(counters: &Counters, pre: PreOutcome) -> BehaviorRegistry {
    let mut registry = BehaviorRegistry::new();
    let counters = counters.clone();
    registry.register("T", move |_| {
        Box::new(Probe { counters: counters.clone(), pre })
    });
    registry
}

/// Profiler that records begin/end calls in order.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    depth:  i32,
}

impl Profiler for Recorder {
    fn begin(&mut self, name: &str) {
        self.depth += 1;
        self.events.push(format!("begin:{name}"));
    }

    fn end(&mut self, name: &str) {
        self.depth -= 1;
        self.events.push(format!("end:{name}"));
    }
}

// ── Activation state machine ─────────────────────────────────────────────────

#[cfg(test)]
mod activation_tests {
    use super::*;

    #[test]
    fn starts_active() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        assert!(b.activated());
        assert_eq!(get(&c.activated), 0);
        assert_eq!(get(&c.deactivated), 0);
    }

    #[test]
    fn hooks_fire_only_on_genuine_transitions() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));

        // (enable, expected activated, expected deactivated) after each call.
        let script = [
            (true,  0, 0),
            (false, 0, 1),
            (false, 0, 1),
            (true,  1, 1),
            (true,  1, 1),
            (false, 1, 2),
            (true,  2, 2),
        ];
        for (enable, on, off) in script {
            let (owner, mut ctx) = fx.split();
            b.activate(enable, owner, &mut ctx);
            assert_eq!(b.activated(), enable);
            assert_eq!(get(&c.activated), on, "after activate({enable})");
            assert_eq!(get(&c.deactivated), off, "after activate({enable})");
        }
    }

    #[test]
    fn deactivation_is_not_destruction() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        b.activate(false, owner, &mut ctx);
        assert_eq!(get(&c.destroyed), 0);
        assert!(!b.is_destroyed());
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping_tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn inactive_behavior_never_steps() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        b.activate(false, owner, &mut ctx);

        let mut rec = Recorder::default();
        b.step_pre_events(owner, &mut ctx, Some(&mut rec)).unwrap();
        b.step_post_events(owner, &mut ctx, Some(&mut rec)).unwrap();
        assert_eq!(get(&c.pre), 0);
        assert_eq!(get(&c.post), 0);
        assert!(rec.events.is_empty(), "no span is opened while inactive");
    }

    #[test]
    fn span_wraps_each_step() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();

        let mut rec = Recorder::default();
        b.step_pre_events(owner, &mut ctx, Some(&mut rec)).unwrap();
        b.step_post_events(owner, &mut ctx, Some(&mut rec)).unwrap();
        assert_eq!(rec.events, ["begin:mover", "end:mover", "begin:mover", "end:mover"]);
        assert_eq!(rec.depth, 0);
        assert_eq!(get(&c.pre), 1);
        assert_eq!(get(&c.post), 1);
    }

    #[test]
    fn steps_without_profiler() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_eq!(get(&c.pre), 1);
    }

    #[test]
    fn span_closes_when_hook_errors() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Fail), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();

        let mut rec = Recorder::default();
        let result = b.step_pre_events(owner, &mut ctx, Some(&mut rec));
        assert!(matches!(result, Err(BehaviorError::Hook { .. })));
        assert_eq!(rec.events, ["begin:mover", "end:mover"]);
        assert_eq!(rec.depth, 0);
    }

    #[test]
    fn span_closes_when_hook_panics() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Panic), &BehaviorData::new("mover", "T"));

        let mut rec = Recorder::default();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let (owner, mut ctx) = fx.split();
            b.step_pre_events(owner, &mut ctx, Some(&mut rec))
        }));
        assert!(outcome.is_err());
        assert_eq!(rec.events, ["begin:mover", "end:mover"]);
        assert_eq!(rec.depth, 0);
    }

    #[test]
    fn deactivate_then_reactivate_scenario() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        assert!(b.activated());

        b.activate(false, owner, &mut ctx);
        assert!(!b.activated());
        assert_eq!(get(&c.deactivated), 1);

        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_eq!(get(&c.pre), 0);

        b.activate(true, owner, &mut ctx);
        assert_eq!(get(&c.activated), 1);

        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_eq!(get(&c.pre), 1);
    }
}

// ── FrameProfiler ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod profiler_tests {
    use super::*;
    use crate::{FrameProfiler, ProfileSpan};

    #[test]
    fn spans_aggregate_samples() {
        let mut p = FrameProfiler::new();
        for _ in 0..3 {
            let _span = ProfileSpan::open(Some(&mut p), "mover");
        }
        assert_eq!(p.open_spans(), 0);
        let s = p.section("mover").unwrap();
        assert_eq!(s.samples, 3);
        assert!(s.max_ms >= s.average_ms);
    }

    #[test]
    fn nested_sections_close_innermost_first() {
        let mut p = FrameProfiler::new();
        p.begin("outer");
        p.begin("inner");
        assert_eq!(p.open_spans(), 2);
        p.end("inner");
        p.end("outer");
        assert_eq!(p.open_spans(), 0);
        assert_eq!(p.summaries().len(), 2);
        assert_eq!(p.unbalanced_ends(), 0);
    }

    #[test]
    fn mismatched_end_is_counted_not_recorded() {
        let mut p = FrameProfiler::new();
        p.end("ghost");
        p.begin("a");
        p.end("b");
        assert_eq!(p.unbalanced_ends(), 2);
        assert_eq!(p.open_spans(), 1);
        assert!(p.section("a").is_none());
    }

    #[test]
    fn instance_steps_balance_frame_profiler() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Fail), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        let mut p = FrameProfiler::new();
        let _ = b.step_pre_events(owner, &mut ctx, Some(&mut p));
        b.step_post_events(owner, &mut ctx, Some(&mut p)).unwrap();
        assert_eq!(p.open_spans(), 0);
        assert_eq!(p.section("mover").map(|s| s.samples), Some(2));
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::{DefaultBehavior, Mover};

    #[test]
    fn empty_type_always_registered() {
        let registry = BehaviorRegistry::new();
        assert!(registry.is_registered(""));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn builtins_are_listed_sorted() {
        let registry = BehaviorRegistry::with_builtins();
        assert_eq!(registry.type_names(), ["", "Mover", "Wander"]);
    }

    #[test]
    fn unknown_type_falls_back_to_default() {
        let registry = BehaviorRegistry::new();
        let mut fx = Fixture::new();
        let data = BehaviorData::new("mover", "DoesNotExist").with("speed", 5);
        let fallback = fx.create(&registry, &data);
        let base = fx.create(&registry, &BehaviorData { type_name: String::new(), ..data.clone() });

        assert!(fallback.activated());
        assert_eq!(fallback.activated(), base.activated());
        assert_eq!(fallback.name(), base.name());
        assert_eq!(fallback.name_id(), base.name_id());
        assert_eq!(fallback.owner(), base.owner());
        assert!(fallback.downcast_ref::<DefaultBehavior>().is_some());
        assert_eq!(fallback.type_name(), "DoesNotExist");
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = BehaviorRegistry::new();
        assert!(!registry.register("K", |_| Box::new(DefaultBehavior)));
        assert!(registry.register("K", |f| Box::new(Mover::from_data(f.data))));
        let mut fx = Fixture::new();
        let b = fx.create(&registry, &BehaviorData::new("k", "K"));
        assert!(b.downcast_ref::<Mover>().is_some());
    }

    #[test]
    fn same_name_same_name_id() {
        let registry = BehaviorRegistry::with_builtins();
        let mut fx = Fixture::new();
        let a = fx.create(&registry, &BehaviorData::new("mover", "Mover"));
        let b = fx.create(&registry, &BehaviorData::new("mover", ""));
        let other = fx.create(&registry, &BehaviorData::new("wanderer", "Wander"));
        assert_eq!(a.name_id(), b.name_id());
        assert_ne!(a.name_id(), other.name_id());
    }

    #[test]
    fn factory_sees_owner_and_handle() {
        let mut registry = BehaviorRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in = seen.clone();
        registry.register("Peek", move |f| {
            assert_eq!(f.handle.entity, f.owner.id);
            seen_in.store(f.owner.width as usize, Ordering::SeqCst);
            Box::new(DefaultBehavior)
        });
        let mut fx = Fixture::new();
        let b = fx.create(&registry, &BehaviorData::new("p", "Peek"));
        assert_eq!(seen.load(Ordering::SeqCst), 10);
        assert_eq!(b.handle().name_id, b.name_id());
    }
}

// ── Lifecycle and hot-reload ──────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn created_and_destroyed_fire_once() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();

        assert_eq!(get(&c.created), 0, "create does not fire on_created");
        b.on_created(owner, &mut ctx).unwrap();
        b.on_created(owner, &mut ctx).unwrap();
        assert_eq!(get(&c.created), 1);

        b.on_destroy(owner, &mut ctx);
        b.on_destroy(owner, &mut ctx);
        assert_eq!(get(&c.destroyed), 1);
        assert!(b.is_destroyed());
    }

    #[test]
    fn hot_reload_notification_is_forwarded() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &BehaviorData::new("mover", "T"));
        let (owner, mut ctx) = fx.split();
        b.on_object_hot_reloaded(owner, &mut ctx);
        assert_eq!(get(&c.hot), 1);
    }

    #[test]
    fn default_kind_refuses_live_patch() {
        let c = Counters::default();
        let mut fx = Fixture::new();
        let old = BehaviorData::new("mover", "T").with("speed", 5);
        let mut b = fx.create(&counting_registry(&c, PreOutcome::Ok), &old);
        let new = old.clone().with("speed", 9);
        assert!(!b.update_from_behavior_data(&new));
        assert_eq!(b.data(), &old, "refused patch keeps the old data");
    }
}

// ── Built-in kinds ────────────────────────────────────────────────────────────

#[cfg(test)]
mod builtin_tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{MoveAxis, Mover, Wander};

    #[test]
    fn mover_moves_along_axis() {
        let registry = BehaviorRegistry::with_builtins();
        let mut fx = Fixture::new();
        let mut b = fx.create(&registry, &BehaviorData::new("m", "Mover").with("speed", 4).with("axis", "y"));
        assert_eq!(b.downcast_ref::<Mover>().map(|m| m.axis), Some(MoveAxis::Y));
        let (owner, mut ctx) = fx.split();
        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_relative_eq!(owner.y, 2.0);
        assert_relative_eq!(owner.x, 0.0);
    }

    #[test]
    fn mover_follows_angle() {
        let registry = BehaviorRegistry::with_builtins();
        let mut fx = Fixture::new();
        fx.owner.angle = 90.0;
        let mut b = fx.create(&registry, &BehaviorData::new("m", "Mover").with("speed", 2));
        let (owner, mut ctx) = fx.split();
        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_relative_eq!(owner.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(owner.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn mover_live_patch_changes_speed() {
        let registry = BehaviorRegistry::with_builtins();
        let mut fx = Fixture::new();
        let old = BehaviorData::new("m", "Mover").with("speed", 5).with("axis", "x");
        let mut b = fx.create(&registry, &old);
        let new = old.clone().with("speed", 9);

        assert!(b.update_from_behavior_data(&new));
        assert_eq!(b.data(), &new);
        let (owner, mut ctx) = fx.split();
        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert_relative_eq!(owner.x, 4.5);
    }

    #[test]
    fn wander_turns_each_interval_deterministically() {
        let registry = BehaviorRegistry::with_builtins();
        let data = BehaviorData::new("w", "Wander").with("interval", 1.0).with("max_turn", 30.0);

        let run = || {
            let mut fx = Fixture::new();
            let mut b = fx.create(&registry, &data);
            let (owner, mut ctx) = fx.split();
            let mut angles = Vec::new();
            for _ in 0..6 {
                b.step_pre_events(owner, &mut ctx, None).unwrap();
                angles.push(owner.angle);
            }
            angles
        };

        let a = run();
        assert_eq!(a, run());
        // 0.5 s frames, 1 s interval: the heading only changes on odd frames.
        assert_eq!(a[0], 0.0);
        assert_eq!(a[1], a[2]);
        assert!(a.iter().all(|&deg| (0.0..360.0).contains(&deg)));
    }

    #[test]
    fn wander_is_not_live_patchable() {
        let mut w = Wander::from_data(&BehaviorData::new("w", "Wander"));
        let old = BehaviorData::new("w", "Wander");
        assert!(!w.update_from_behavior_data(&old, &old.clone().with("interval", 2.0)));
    }

    #[test]
    fn wander_tiny_interval_takes_bounded_turns() {
        let registry = BehaviorRegistry::with_builtins();
        let data = BehaviorData::new("w", "Wander").with("interval", 1e-10);
        let mut fx = Fixture::new();
        let mut b = fx.create(&registry, &data);
        let (owner, mut ctx) = fx.split();
        for _ in 0..3 {
            b.step_pre_events(owner, &mut ctx, None).unwrap();
        }
        assert!((0.0..360.0).contains(&owner.angle));
    }

    #[test]
    fn wander_huge_max_turn_is_clamped() {
        let registry = BehaviorRegistry::with_builtins();
        let data = BehaviorData::new("w", "Wander").with("interval", 0.5).with("max_turn", 1e39);
        let mut fx = Fixture::new();
        let mut b = fx.create(&registry, &data);
        assert_eq!(b.downcast_ref::<Wander>().unwrap().max_turn, 180.0);

        let (owner, mut ctx) = fx.split();
        b.step_pre_events(owner, &mut ctx, None).unwrap();
        assert!((0.0..360.0).contains(&owner.angle));
    }
}

// ── BehaviorData ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod data_tests {
    use super::*;

    #[test]
    fn deserializes_kind_specific_fields() {
        let data: BehaviorData =
            serde_json::from_str(r#"{ "name": "mover", "type": "Mover", "speed": 5, "axis": "x" }"#)
                .unwrap();
        assert_eq!(data.name, "mover");
        assert_eq!(data.type_name, "Mover");
        assert_eq!(data.number("speed"), Some(5.0));
        assert_eq!(data.str("axis"), Some("x"));
        assert!(!data.properties.contains_key("type"));
    }

    #[test]
    fn missing_name_and_type_default_to_empty() {
        let data: BehaviorData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.name, "");
        assert_eq!(data.type_name, "");
        assert_eq!(data.f32_or("speed", 3.0), 3.0);
        assert!(data.bool_or("enabled", true));
    }
}
