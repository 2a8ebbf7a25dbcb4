//! `rt-behavior` — attachable per-entity logic for the rt runtime.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`data`]      | `BehaviorData` — declarative `{ name, type, ..fields }` config    |
//! | [`context`]   | `SceneContext<'a>` — frame info, scene resources, entity RNG      |
//! | [`model`]     | `Behavior` trait — extension hooks with no-op defaults            |
//! | [`instance`]  | `BehaviorInstance` — activation state machine, profiled stepping  |
//! | [`profiler`]  | `Profiler` trait, `ProfileSpan` guard, `FrameProfiler`            |
//! | [`registry`]  | `BehaviorRegistry`, `FactoryContext`, `BehaviorFactory`           |
//! | [`noop`]      | `DefaultBehavior` — the inert kind registered under `""`          |
//! | [`mover`]     | `Mover` — constant-speed movement, live-patchable                 |
//! | [`wander`]    | `Wander` — random heading changes from the entity RNG             |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Design notes
//!
//! Every frame the owning scene runs two phases over its entities:
//!
//! 1. **Pre-events**: `BehaviorInstance::step_pre_events` for every attached
//!    behavior, in attachment order.
//! 2. Game logic (the scene's event sheet) runs.
//! 3. **Post-events**: `BehaviorInstance::step_post_events`, same order.
//!
//! The public stepping methods live on `BehaviorInstance`, not on the trait,
//! so activation gating and profiling apply uniformly: concrete kinds only
//! implement the `do_*` hooks and can never bypass either.

pub mod context;
pub mod data;
pub mod error;
pub mod instance;
pub mod model;
pub mod mover;
pub mod noop;
pub mod profiler;
pub mod registry;
pub mod wander;

#[cfg(test)]
mod tests;

pub use context::SceneContext;
pub use data::BehaviorData;
pub use error::{BehaviorError, BehaviorResult};
pub use instance::BehaviorInstance;
pub use model::Behavior;
pub use mover::{MoveAxis, Mover};
pub use noop::DefaultBehavior;
pub use profiler::{FrameProfiler, ProfileSpan, Profiler, SectionSummary};
pub use registry::{BehaviorFactory, BehaviorRegistry, FactoryContext};
pub use wander::Wander;
