//! Axis-aligned bounding boxes in scene (pixel) coordinates.
//!
//! Y grows downwards as in screen space, but nothing here depends on that:
//! `min` is always the component-wise smaller corner.

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Aabb {
    /// Build from two corners in any order.
    #[inline]
    pub fn new(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            min: [a[0].min(b[0]), a[1].min(b[1])],
            max: [a[0].max(b[0]), a[1].max(b[1])],
        }
    }

    /// Rectangle anchored at its top-left corner `(x, y)`.
    #[inline]
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new([x, y], [x + width, y + height])
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    /// `true` if the boxes overlap or touch.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min[0] <= other.max[0]
            && other.min[0] <= self.max[0]
            && self.min[1] <= other.max[1]
            && other.min[1] <= self.max[1]
    }

    #[inline]
    pub fn contains_point(&self, p: [f32; 2]) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }
}

/// Anything that can report its current bounding box.
///
/// This is the owner-side collaborator of the spatial bounds cache: the
/// cache copies whatever `bounding_box` returns at synchronization time.
pub trait Bounded {
    fn bounding_box(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn bounding_box(&self) -> Aabb {
        *self
    }
}
