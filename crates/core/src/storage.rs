use crate::entity::EntityId;
use std::collections::BTreeMap;

/// Homogeneous table holding one component type, keyed by entity.
///
/// Backed by a `BTreeMap` so iteration follows entity creation order.
#[derive(Clone, Debug)]
pub struct Storage<T> {
    rows: BTreeMap<EntityId, T>,
}

impl<T> Storage<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Insert or replace. Returns the replaced value.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        self.rows.insert(id, value)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.rows.iter().map(|(id, value)| (*id, value))
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.rows.keys().copied()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}
