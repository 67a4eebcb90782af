use crate::component::{Component, ComponentSet, Query};
use crate::entity::{EntityAllocator, EntityId};
use crate::errors::EcsError;
use std::collections::BTreeSet;

/// Owns entity identities and their component tables.
///
/// Every query returns a snapshot (an owned `Vec<EntityId>` in creation
/// order), so callers may create and destroy entities while walking a result.
/// Ids in a snapshot can go stale; re-check with [`Registry::is_alive`] or a
/// component lookup before use.
#[derive(Debug)]
pub struct Registry<S: ComponentSet> {
    allocator: EntityAllocator,
    alive: BTreeSet<EntityId>,
    components: S,
}

impl<S: ComponentSet> Registry<S> {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            alive: BTreeSet::new(),
            components: S::default(),
        }
    }

    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.alive.insert(id);
        id
    }

    /// Remove the entity and all of its components.
    /// Returns false if it was already gone.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        if !self.alive.remove(&id) {
            return false;
        }
        self.components.remove_entity(id);
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    /// Attach `value`, replacing any component of the same type.
    /// Returns the replaced component.
    pub fn add_component<C: Component<S>>(
        &mut self,
        id: EntityId,
        value: C,
    ) -> Result<Option<C>, EcsError> {
        if !self.is_alive(id) {
            return Err(EcsError::NoSuchEntity(id));
        }
        Ok(C::storage_mut(&mut self.components).insert(id, value))
    }

    pub fn get_component<C: Component<S>>(&self, id: EntityId) -> Option<&C> {
        C::storage(&self.components).get(id)
    }

    pub fn get_component_mut<C: Component<S>>(&mut self, id: EntityId) -> Option<&mut C> {
        C::storage_mut(&mut self.components).get_mut(id)
    }

    pub fn has_component<C: Component<S>>(&self, id: EntityId) -> bool {
        C::storage(&self.components).contains(id)
    }

    pub fn remove_component<C: Component<S>>(&mut self, id: EntityId) -> Option<C> {
        C::storage_mut(&mut self.components).remove(id)
    }

    /// Snapshot of every live entity.
    pub fn query_all(&self) -> Vec<EntityId> {
        self.alive.iter().copied().collect()
    }

    /// Snapshot of the entities holding every component in `Q`.
    pub fn query_with<Q: Query<S>>(&self) -> Vec<EntityId> {
        self.alive
            .iter()
            .copied()
            .filter(|&id| Q::matches(&self.components, id))
            .collect()
    }

    /// Snapshot of the entities holding a component of the given kind.
    pub fn query_kind(&self, kind: S::Kind) -> Vec<EntityId> {
        self.alive
            .iter()
            .copied()
            .filter(|&id| self.components.contains_kind(id, kind))
            .collect()
    }

    /// Direct access to the tables, for borrowing several components of one
    /// entity at once.
    pub fn components(&self) -> &S {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut S {
        &mut self.components
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Destroy every entity. Ids are not recycled afterwards.
    pub fn clear(&mut self) {
        self.alive.clear();
        self.components.clear();
    }
}

impl<S: ComponentSet> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}
