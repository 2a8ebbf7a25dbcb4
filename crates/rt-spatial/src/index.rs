//! R-tree of bounds caches.

use rstar::{AABB, PointDistance, RTree};

use rt_core::{Aabb, EntityId, Resources};

use crate::{SpatialBoundsCache, SpatialError, SpatialResult};

/// Spatial index over [`SpatialBoundsCache`] snapshots.
///
/// Entries are copies: the index never mutates a stored cache, and a
/// behavior whose owner moved must [`replace`](Self::replace) its entry.
/// Lives in the scene's [`Resources`] so behaviors can reach it from hooks.
#[derive(Default)]
pub struct BoundsIndex {
    tree: RTree<SpatialBoundsCache>,
}

impl BoundsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the index stored in `resources`.
    pub fn from_resources(resources: &Resources) -> SpatialResult<&BoundsIndex> {
        resources.get::<BoundsIndex>().ok_or(SpatialError::MissingIndex)
    }

    /// Mutably borrow the index stored in `resources`.
    pub fn from_resources_mut(resources: &mut Resources) -> SpatialResult<&mut BoundsIndex> {
        resources.get_mut::<BoundsIndex>().ok_or(SpatialError::MissingIndex)
    }

    pub fn insert(&mut self, cache: SpatialBoundsCache) {
        self.tree.insert(cache);
    }

    /// Remove the entry equal to `cache`.  Returns `false` if none was stored.
    pub fn remove(&mut self, cache: &SpatialBoundsCache) -> bool {
        self.tree.remove(cache).is_some()
    }

    /// Remove `old` and insert `new`.  Returns whether `old` was present.
    pub fn replace(&mut self, old: &SpatialBoundsCache, new: SpatialBoundsCache) -> bool {
        let removed = self.remove(old);
        self.insert(new);
        removed
    }

    pub fn contains(&self, cache: &SpatialBoundsCache) -> bool {
        self.tree.contains(cache)
    }

    /// Entries whose box overlaps `area`.
    pub fn intersecting(&self, area: &Aabb) -> impl Iterator<Item = &SpatialBoundsCache> + '_ {
        let envelope = AABB::from_corners(area.min, area.max);
        self.tree.locate_in_envelope_intersecting(&envelope)
    }

    /// Closest entry to `point` not owned by `exclude`, within `max_distance`.
    pub fn nearest(
        &self,
        point:        [f32; 2],
        exclude:      EntityId,
        max_distance: f32,
    ) -> Option<&SpatialBoundsCache> {
        let max_2 = max_distance * max_distance;
        self.tree
            .nearest_neighbor_iter(&point)
            .find(|c| c.entity() != exclude)
            .filter(|c| c.distance_2(&point) <= max_2)
    }

    /// All entries for `entity`, in no particular order.
    pub fn entries_for(&self, entity: EntityId) -> impl Iterator<Item = &SpatialBoundsCache> + '_ {
        self.tree.iter().filter(move |c| c.entity() == entity)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }
}
