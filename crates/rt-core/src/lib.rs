//! `rt-core` — foundational types for the `rt` behavior runtime.
//!
//! This crate is a dependency of every other `rt-*` crate.  It intentionally
//! has no `rt-*` dependencies and few external ones (`rand`, `rustc-hash`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `NameId`, `BehaviorHandle`                   |
//! | [`geo`]         | `Aabb`, `Bounded`                                        |
//! | [`names`]       | `NameInterner` (append-only string → `NameId`)           |
//! | [`entity`]      | `EntityState` — owner geometry seen by behaviors         |
//! | [`time`]        | `Frame`, `FrameClock`, `SceneConfig`                     |
//! | [`rng`]         | `EntityRng` (per-entity, deterministic)                  |
//! | [`resources`]   | `Resources` — type-keyed scene services                  |
//! | [`error`]       | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to plain data types.        |
//!           | Required by `rt-scene` to load scenes from JSON.           |

pub mod entity;
pub mod error;
pub mod geo;
pub mod ids;
pub mod names;
pub mod resources;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use entity::EntityState;
pub use error::{CoreError, CoreResult};
pub use geo::{Aabb, Bounded};
pub use ids::{BehaviorHandle, EntityId, NameId};
pub use names::NameInterner;
pub use resources::Resources;
pub use rng::EntityRng;
pub use time::{Frame, FrameClock, SceneConfig};
