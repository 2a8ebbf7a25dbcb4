//! Type-erased storage for scene-wide services.
//!
//! # Design
//!
//! Each resource type `T` is stored once, behind a `Box<dyn Any>` in a map
//! keyed by `TypeId`.  Behaviors reach shared services (the spatial index,
//! for one) through `ctx.resources` without `rt-behavior` having to know the
//! concrete types.
//!
//! # Usage
//!
//! ```rust
//! use rt_core::Resources;
//!
//! #[derive(Default)]
//! struct Score(u32);
//!
//! let mut res = Resources::new();
//! res.insert(Score(3));
//! res.get_mut::<Score>().unwrap().0 += 1;
//! assert_eq!(res.get::<Score>().unwrap().0, 4);
//! ```

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

/// One value per type.  Inserting a second value of the same type replaces
/// the first.
#[derive(Default)]
pub struct Resources {
    map: FxHashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`, returning the previous value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    /// `true` if a `T` is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Number of distinct resource types.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
