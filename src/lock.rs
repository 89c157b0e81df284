//! Per-battle mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::battle::BattleId;

/// One lock per battle id. Operations on different battles never contend.
///
/// Entries only live while some caller holds or waits for them, so ids of
/// finished or unknown battles do not accumulate.
#[derive(Debug, Default)]
pub struct BattleLocks {
    locks: Mutex<HashMap<BattleId, Arc<Mutex<()>>>>,
}

impl BattleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `battle`.
    pub fn with_battle<T>(&self, battle: BattleId, f: impl FnOnce() -> T) -> T {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(battle).or_default())
        };
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(battle, lock);
        result
    }

    /// Number of battles currently locked or waited on.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Handles are only cloned under the map lock, so a count of two (map plus
    // `lock`) means no other caller can still reach this entry.
    fn release(&self, battle: BattleId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&battle);
        }
    }
}
