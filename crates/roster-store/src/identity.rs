//! Per-kind identity map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a canonical entity instance.
///
/// Two handles refer to the same instance iff `Rc::ptr_eq` holds.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a freshly constructed entity in a [`Shared`] handle.
pub fn share<T>(entity: T) -> Shared<T> {
    Rc::new(RefCell::new(entity))
}

/// Maps a persisted id to the one live instance for that id.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> IdentityMap<T> {
    /// Returns a handle to the cached instance for `id`.
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registers `entity` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: i64, entity: Shared<T>) {
        self.entries.insert(id, entity);
    }

    pub fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
