//! Keyed entity stores consumed by the engine.
//!
//! Writes always replace the whole value; there are no partial updates.

use core::fmt::Debug;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::battle::Battle;
use crate::fleet::Fleet;
use crate::player::Player;
use crate::ship::Ship;

/// A value stored under a primary key.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Ord + Clone + Debug + Send + Sync + 'static;
    /// Human readable entity name used in errors and logs.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} {key} already exists")]
pub struct AlreadyExists {
    pub kind: &'static str,
    pub key: String,
}

/// Storage for one kind of entity.
pub trait Repository<E: Entity>: Send + Sync {
    fn get(&self, key: &E::Key) -> Option<E>;

    fn contains(&self, key: &E::Key) -> bool;

    /// Store a new value. Fails if the key is already present.
    fn insert(&self, value: E) -> Result<(), AlreadyExists>;

    /// Replace the stored value with the same key, inserting if absent.
    fn save(&self, value: E);

    /// All values in key order.
    fn values(&self) -> Vec<E>;

    /// Values whose key falls in `keys`, in key order.
    fn values_in(&self, keys: RangeInclusive<E::Key>) -> Vec<E>;
}

pub struct InMemoryRepository<E: Entity> {
    entries: RwLock<BTreeMap<E::Key, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn get(&self, key: &E::Key) -> Option<E> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn contains(&self, key: &E::Key) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    fn insert(&self, value: E) -> Result<(), AlreadyExists> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let key = value.key();
        if entries.contains_key(&key) {
            return Err(AlreadyExists {
                kind: E::KIND,
                key: format!("{:?}", key),
            });
        }
        entries.insert(key, value);
        Ok(())
    }

    fn save(&self, value: E) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(value.key(), value);
    }

    fn values(&self) -> Vec<E> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().cloned().collect()
    }

    fn values_in(&self, keys: RangeInclusive<E::Key>) -> Vec<E> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.range(keys).map(|(_, v)| v.clone()).collect()
    }
}

/// The four stores the engine reads and writes.
#[derive(Clone)]
pub struct Stores {
    pub players: Arc<dyn Repository<Player>>,
    pub battles: Arc<dyn Repository<Battle>>,
    pub fleets: Arc<dyn Repository<Fleet>>,
    pub ships: Arc<dyn Repository<Ship>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            players: Arc::new(InMemoryRepository::<Player>::new()),
            battles: Arc::new(InMemoryRepository::<Battle>::new()),
            fleets: Arc::new(InMemoryRepository::<Fleet>::new()),
            ships: Arc::new(InMemoryRepository::<Ship>::new()),
        }
    }
}
