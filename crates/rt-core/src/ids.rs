//! Typed identifiers for entities, interned names and attached behaviors.
//!
//! `EntityId` indexes the scene arena and `NameId` the name interner.  Both
//! are `Copy + Ord + Hash`; use `.index()` rather than `.0 as usize` when
//! addressing a `Vec`.

use std::fmt;

/// Newtype over an unsigned integer with an `INVALID` sentinel default.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "no entity/name"; the inner value is `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Slot of an entity in the scene arena.  Never reused within a scene.
    pub struct EntityId(u32);
}

typed_id! {
    /// Interned form of an entity or behavior name.  See [`NameInterner`][crate::NameInterner].
    pub struct NameId(u32);
}

/// Lightweight, non-owning reference to one behavior attached to one entity.
///
/// Behavior names are unique per entity, so `(entity, name_id)` identifies a
/// behavior for as long as it stays attached.  Used as the back-reference
/// stored in spatial index entries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorHandle {
    pub entity:  EntityId,
    pub name_id: NameId,
}

impl BehaviorHandle {
    #[inline]
    pub fn new(entity: EntityId, name_id: NameId) -> Self {
        Self { entity, name_id }
    }
}

impl fmt::Display for BehaviorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity, self.name_id)
    }
}
