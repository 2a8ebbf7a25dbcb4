//! arena — a small scene exercising every built-in behavior kind.
//!
//! Six objects drift around a 320×240 arena.  Movers push them, Wander
//! perturbs their headings, `Wrap` (registered here) keeps them inside the
//! arena, BoundsTrackers keep the R-tree current and NearestPickers report
//! who is closest to whom.
//!
//! Halfway through, the event sheet hot-reloads the hunter with a faster
//! Mover and a wider picker radius, then disables the prey's wander.
//!
//! ```text
//! cargo run -p arena --release            # embedded scene
//! cargo run -p arena -- scene.json -v     # scene from disk, debug logging
//! ```

mod logging;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use rt_behavior::{Behavior, BehaviorError, BehaviorResult, SceneContext};
use rt_core::{BehaviorHandle, EntityId, EntityState, Frame};
use rt_scene::{Runtime, Scene, SceneData, SceneObserver};
use rt_spatial::NearestPicker;

// ── Constants ─────────────────────────────────────────────────────────────────

const ARENA_W:         f32 = 320.0;
const ARENA_H:         f32 = 240.0;
const REPORT_INTERVAL: u64 = 60;

const SCENE_JSON: &str = r#"{
  "config": { "frame_duration_ms": 16, "total_frames": 600, "seed": 2024, "profiling": true },
  "objects": [
    { "name": "hunter", "x": 10, "y": 10, "width": 16, "height": 16, "angle": 30,
      "behaviors": [
        { "name": "move",   "type": "Mover", "speed": 60 },
        { "name": "wrap",   "type": "Wrap" },
        { "name": "bounds", "type": "BoundsTracker" },
        { "name": "pick",   "type": "NearestPicker", "radius": 80 }
      ] },
    { "name": "prey", "x": 200, "y": 120, "width": 12, "height": 12, "angle": 200,
      "behaviors": [
        { "name": "move",   "type": "Mover", "speed": 45 },
        { "name": "wander", "type": "Wander", "interval": 0.5, "max_turn": 60 },
        { "name": "wrap",   "type": "Wrap" },
        { "name": "bounds", "type": "BoundsTracker" }
      ] },
    { "name": "rock-1", "x": 80,  "y": 200, "width": 24, "height": 24,
      "behaviors": [ { "name": "bounds", "type": "BoundsTracker" } ] },
    { "name": "rock-2", "x": 260, "y": 40,  "width": 24, "height": 24,
      "behaviors": [ { "name": "bounds", "type": "BoundsTracker" } ] },
    { "name": "drifter", "x": 150, "y": 30, "width": 8, "height": 8,
      "behaviors": [
        { "name": "move",   "type": "Mover", "speed": 20, "axis": "y" },
        { "name": "wrap",   "type": "Wrap" },
        { "name": "bounds", "type": "BoundsTracker" },
        { "name": "legacy", "type": "RetiredKind" }
      ] },
    { "name": "scout", "x": 300, "y": 220, "width": 8, "height": 8, "angle": 135,
      "behaviors": [
        { "name": "move",   "type": "Mover", "speed": 30 },
        { "name": "wander", "type": "Wander" },
        { "name": "wrap",   "type": "Wrap" },
        { "name": "bounds", "type": "BoundsTracker" },
        { "name": "pick",   "type": "NearestPicker" }
      ] }
  ]
}"#;

// ── Extension behavior ────────────────────────────────────────────────────────

/// Teleports its owner to the opposite edge when it leaves the arena.
struct Wrap;

impl Behavior for Wrap {
    fn do_step_pre_events(&mut self, owner: &mut EntityState, _ctx: &mut SceneContext<'_>) -> BehaviorResult<()> {
        let x = owner.x.rem_euclid(ARENA_W);
        let y = owner.y.rem_euclid(ARENA_H);
        if x != owner.x || y != owner.y {
            owner.set_position(x, y);
        }
        Ok(())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    steps:  usize,
    errors: usize,
}

impl SceneObserver for Progress {
    fn on_behavior_error(&mut self, frame: Frame, handle: BehaviorHandle, error: &BehaviorError) {
        self.errors += 1;
        warn!("{frame}: {handle}: {error}");
    }

    fn on_frame_end(&mut self, frame: Frame, stepped: usize) {
        self.steps += stepped;
        if frame.0.is_multiple_of(REPORT_INTERVAL) {
            info!("{frame}: {} behavior steps so far", self.steps);
        }
    }

    fn on_scene_end(&mut self, final_frame: Frame) {
        info!("scene ended at {final_frame}: {} steps, {} errors", self.steps, self.errors);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene JSON to load instead of the embedded one
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let data = match &args.path {
        Some(path) => SceneData::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => SceneData::from_json_str(SCENE_JSON)?,
    };

    let mut rt = Runtime::new();
    rt.registry.register("Wrap", |_| Box::new(Wrap));
    info!("registered behavior types: {:?}", rt.registry.type_names());

    let mut scene = Scene::from_data(&mut rt, &data)?;
    info!("spawned {} objects", scene.len());

    let hunter = find(&scene, "hunter");
    let prey = find(&scene, "prey");
    let reload_at = Frame(data.config.total_frames / 2);
    let original = data.objects.iter().find(|o| o.name == "hunter").cloned();

    let mut events = |scene: &mut Scene, rt: &mut Runtime, frame: Frame| {
        if frame != reload_at {
            return;
        }
        if let (Some(id), Some(old)) = (hunter, original.as_ref()) {
            let mut new = old.clone();
            for b in new.behaviors.iter_mut() {
                match b.name.as_str() {
                    "move" => b.properties.insert("speed".into(), 90.into()),
                    "pick" => b.properties.insert("radius".into(), 200.into()),
                    _ => None,
                };
            }
            match scene.hot_reload_object(rt, id, old, &new) {
                Ok(report) => info!("{frame}: hot-reloaded hunter: {report:?}"),
                Err(e) => warn!("{frame}: hot-reload failed: {e}"),
            }
        }
        if let Some(id) = prey {
            if let Err(e) = scene.activate_behavior(id, "wander", false) {
                warn!("{frame}: {e}");
            }
        }
    };

    let started = Instant::now();
    let mut progress = Progress::default();
    scene.run(&mut rt, &mut events, &mut progress);
    info!("ran {} frames in {:.1?}", scene.clock.current_frame.0, started.elapsed());

    report_targets(&scene);
    if let Some(profiler) = scene.profiler() {
        for s in profiler.summaries() {
            info!(
                "{:<8} last {:>7.4} ms  avg {:>7.4} ms  max {:>7.4} ms  ({} samples)",
                s.name, s.last_ms, s.average_ms, s.max_ms, s.samples,
            );
        }
    }
    Ok(())
}

fn find(scene: &Scene, name: &str) -> Option<EntityId> {
    scene.entities().find(|e| e.state.name == name).map(|e| e.id())
}

fn report_targets(scene: &Scene) {
    for entity in scene.entities() {
        let Some(picker) = entity.behavior("pick").and_then(|b| b.downcast_ref::<NearestPicker>()) else {
            continue;
        };
        let target = picker
            .target()
            .and_then(|id| scene.entity(id))
            .map_or("nobody", |e| e.state.name.as_str());
        info!(
            "{} at ({:.0}, {:.0}) is nearest to {target}",
            entity.state.name, entity.state.x, entity.state.y,
        );
    }
}
