use crate::pool::Resettable;
use dashmap::DashMap;
use fxhash::FxBuildHasher;
use std::sync::Arc;

/// Caller-chosen unique identifier. Reference counted so search results can
/// hand out keys without copying the string.
pub type EntityKey = Arc<str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub key: EntityKey,
}

impl Entity {
    pub fn new(x: f64, y: f64, key: EntityKey) -> Self {
        Self { x, y, key }
    }
}

/// Key to entity map owned by one partition.
///
/// Safe for concurrent get/put/delete/iterate from many threads. Iterating
/// while another thread writes never blocks forever or crashes; the iterator
/// sees each entry either before or after the write.
#[derive(Debug)]
pub struct EntityStore {
    entities: DashMap<EntityKey, Entity, FxBuildHasher>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
        }
    }

    /// Stores the entity under its key, returning whatever was there before.
    pub fn store(&self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.key.clone(), entity)
    }

    pub fn remove(&self, key: &str) -> Option<Entity> {
        self.entities.remove(key).map(|(_, entity)| entity)
    }

    pub fn get(&self, key: &str) -> Option<Entity> {
        self.entities.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entities.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Appends every resident key to `keys`.
    pub fn collect_keys(&self, keys: &mut Vec<EntityKey>) {
        keys.extend(self.entities.iter().map(|entry| entry.key().clone()));
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Entity),
    {
        for entry in self.entities.iter() {
            f(entry.value());
        }
    }

    pub fn clear(&self) {
        self.entities.clear();
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Resettable for EntityStore {
    fn reset(&mut self) {
        self.entities.clear();
    }
}
