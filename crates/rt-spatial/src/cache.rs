//! Detached bounding-box snapshot stored in spatial indexes.
//!
//! An R-tree must not see the box of an entry change while the entry is
//! stored: its internal nodes were built from the old box.  Storing the live
//! entity would also mean reading mutable entity state during traversal.
//! `SpatialBoundsCache` is the stable record the index holds instead.

use rstar::{AABB, Envelope, PointDistance, RTreeObject};

use rt_core::{Aabb, BehaviorHandle, Bounded, EntityId};

/// The owner's bounding box as of the last synchronization, plus a
/// back-reference to the behavior the cache belongs to.
///
/// Bounds are private: only [`new`](Self::new) and
/// [`resynchronize`](Self::resynchronize) write them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialBoundsCache {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    owner: BehaviorHandle,
}

impl SpatialBoundsCache {
    /// Capture `entity`'s current bounding box for behavior `owner`.
    pub fn new<B: Bounded + ?Sized>(owner: BehaviorHandle, entity: &B) -> Self {
        let mut cache = Self { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0, owner };
        cache.resynchronize(entity);
        cache
    }

    /// Recompute the bounds from `entity`'s current bounding box.
    ///
    /// Touches no index.  If this cache is stored in one, remove the old
    /// snapshot before calling this and insert the new one after.
    pub fn resynchronize<B: Bounded + ?Sized>(&mut self, entity: &B) {
        let b = entity.bounding_box();
        self.min_x = b.min[0];
        self.min_y = b.min[1];
        self.max_x = b.max[0];
        self.max_y = b.max[1];
    }

    /// `true` if `entity`'s box differs from the cached one.
    pub fn is_stale<B: Bounded + ?Sized>(&self, entity: &B) -> bool {
        self.aabb() != entity.bounding_box()
    }

    pub fn min_x(&self) -> f32 { self.min_x }
    pub fn min_y(&self) -> f32 { self.min_y }
    pub fn max_x(&self) -> f32 { self.max_x }
    pub fn max_y(&self) -> f32 { self.max_y }

    pub fn aabb(&self) -> Aabb {
        Aabb { min: [self.min_x, self.min_y], max: [self.max_x, self.max_y] }
    }

    pub fn owner(&self) -> BehaviorHandle {
        self.owner
    }

    /// Shorthand for `owner().entity`.
    pub fn entity(&self) -> EntityId {
        self.owner.entity
    }
}

impl RTreeObject for SpatialBoundsCache {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PointDistance for SpatialBoundsCache {
    /// Squared distance from `point` to the nearest point of the box; zero
    /// inside it.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        Envelope::distance_2(&self.envelope(), point)
    }
}
