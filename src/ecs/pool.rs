use bevy_ecs::prelude::{Entity, Resource};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub spawned: u32,
    pub reused: u32,
    pub despawned: u32,
}

/// Free lists of despawned instances keyed by prefab name, with an optional cap on live
/// instances across all prefabs.
#[derive(Resource, Default)]
pub struct InstancePool {
    free: HashMap<Arc<str>, Vec<Entity>>,
    live: usize,
    capacity: Option<usize>,
    stats: PoolStats,
}

impl InstancePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity: Some(capacity), ..Self::default() }
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn live(&self) -> usize {
        self.live
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn has_room(&self) -> bool {
        self.capacity.map_or(true, |cap| self.live < cap)
    }

    pub fn free_count(&self, prefab: &str) -> usize {
        self.free.get(prefab).map_or(0, Vec::len)
    }

    pub(crate) fn take_free(&mut self, prefab: &str) -> Option<Entity> {
        let entity = self.free.get_mut(prefab)?.pop()?;
        self.live += 1;
        self.stats.reused += 1;
        Some(entity)
    }

    pub(crate) fn note_spawned(&mut self) {
        self.live += 1;
        self.stats.spawned += 1;
    }

    pub(crate) fn give_back(&mut self, prefab: Arc<str>, entity: Entity) {
        self.live = self.live.saturating_sub(1);
        self.stats.despawned += 1;
        self.free.entry(prefab).or_default().push(entity);
    }
}
