//! `rt-spatial` — spatial bounds caching and indexing for behaviors.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`cache`]   | `SpatialBoundsCache` — explicitly synchronized bbox snapshot    |
//! | [`index`]   | `BoundsIndex` — R-tree of caches (via `rstar`)                  |
//! | [`tracker`] | `BoundsTracker` — keeps its owner's cache current in the index  |
//! | [`picker`]  | `NearestPicker` — finds the nearest other indexed entity        |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                              |
//!
//! # Staleness
//!
//! A cache never follows its owner on its own.  Whoever needs current bounds
//! must notice the owner moved, call `resynchronize`, and replace the index
//! entry (remove the old snapshot, insert the new one).  `BoundsTracker` does
//! exactly that during post-events and on hot-reload.

pub mod cache;
pub mod error;
pub mod index;
pub mod picker;
pub mod tracker;


pub use cache::SpatialBoundsCache;
pub use error::{SpatialError, SpatialResult};
pub use index::BoundsIndex;
pub use picker::NearestPicker;
pub use tracker::BoundsTracker;

use rt_behavior::BehaviorRegistry;

/// Register `BoundsTracker` and `NearestPicker` under their type names.
pub fn register_spatial_behaviors(registry: &mut BehaviorRegistry) {
    registry.register(BoundsTracker::TYPE_NAME, |f| {
        Box::new(BoundsTracker::new(f.handle, f.owner))
    });
    registry.register(NearestPicker::TYPE_NAME, |f| Box::new(NearestPicker::from_data(f.data)));
}
