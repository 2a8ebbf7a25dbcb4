//! Owner-side entity state visible to behaviors.

use crate::{Aabb, Bounded, EntityId, NameId};

/// Geometry and identity of one scene entity.
///
/// This is the part of an entity a behavior may read and mutate from its
/// hooks.  The scene owns it by value next to the entity's behavior list, so
/// a behavior only ever refers back to its owner through `EntityId`.
///
/// The bounding box is the axis-aligned rectangle anchored at `(x, y)`;
/// `angle` (degrees) is a heading and does not rotate the box.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityState {
    pub id:      EntityId,
    pub name:    String,
    pub name_id: NameId,
    pub x:       f32,
    pub y:       f32,
    pub width:   f32,
    pub height:  f32,
    pub angle:   f32,
}

impl EntityState {
    /// A zero-sized entity at the origin.
    pub fn new(id: EntityId, name: impl Into<String>, name_id: NameId) -> Self {
        Self {
            id,
            name: name.into(),
            name_id,
            x:      0.0,
            y:      0.0,
            width:  0.0,
            height: 0.0,
            angle:  0.0,
        }
    }

    pub fn with_rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Center of the bounding box.
    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }
}

impl Bounded for EntityState {
    fn bounding_box(&self) -> Aabb {
        Aabb::from_rect(self.x, self.y, self.width, self.height)
    }
}
