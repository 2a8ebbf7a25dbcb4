//! `rt-scene` — scene runner for the rt runtime.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① Pre-events  — step_pre_events on every activated behavior
//!                   (ascending EntityId, then attachment order).
//!   ② Events      — EventSheet::run_events(scene, runtime, frame).
//!   ③ Post-events — step_post_events, same order as ①.
//!   ④ Advance     — FrameClock::advance.
//! ```
//!
//! A failing hook is reported through
//! [`SceneObserver::on_behavior_error`] and logged; the frame carries on with
//! the next behavior.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rt_scene::{NoEvents, NoopObserver, Runtime, Scene, SceneData};
//!
//! let mut rt = Runtime::new();
//! let data = SceneData::from_path("level1.json")?;
//! let mut scene = Scene::from_data(&mut rt, &data)?;
//! scene.run(&mut rt, &mut NoEvents, &mut NoopObserver);
//! ```

pub mod builder;
pub mod data;
pub mod error;
pub mod hot_reload;
pub mod observer;
pub mod runtime;
pub mod scene;


pub use builder::SceneBuilder;
pub use data::{ObjectData, SceneData};
pub use error::{SceneError, SceneResult};
pub use hot_reload::HotReloadReport;
pub use observer::{EventSheet, NoEvents, NoopObserver, SceneObserver};
pub use runtime::Runtime;
pub use scene::{Entity, Scene};
