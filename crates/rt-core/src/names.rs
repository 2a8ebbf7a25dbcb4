//! Append-only name interning.
//!
//! Entity and behavior names are compared constantly (event conditions,
//! behavior lookup by name).  Interning maps each distinct string to a dense
//! `NameId` once, so later comparisons are integer equality.
//!
//! Ids are handed out sequentially from 0 and are never removed or reused for
//! the lifetime of the interner, so a `NameId` stays valid as long as the
//! interner that produced it is alive.

use rustc_hash::FxHashMap;

use crate::{CoreError, CoreResult, NameId};

/// String → `NameId` table shared by every scene of a runtime.
#[derive(Default, Debug)]
pub struct NameInterner {
    ids:   FxHashMap<String, NameId>,
    names: Vec<String>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, allocating the next one on first sight.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NameId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        id
    }

    /// Look up without allocating.
    pub fn get(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    /// The string an id was interned from.
    pub fn resolve(&self, id: NameId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Like [`resolve`](Self::resolve) but as an error for `?` call sites.
    pub fn name_of(&self, id: NameId) -> CoreResult<&str> {
        self.resolve(id).ok_or(CoreError::UnknownName(id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
