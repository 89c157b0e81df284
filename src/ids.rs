//! Identifier generation for new battles and players.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::battle::BattleId;
use crate::player::PlayerId;

pub trait IdGenerator: Send + Sync {
    fn next_battle_id(&self) -> BattleId;
    fn next_player_id(&self) -> PlayerId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_battle_id(&self) -> BattleId {
        BattleId(Uuid::new_v4())
    }

    fn next_player_id(&self) -> PlayerId {
        PlayerId(Uuid::new_v4())
    }
}

/// Counter-based UUIDs, for reproducible runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_uuid(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(n as u128)
    }
}

impl IdGenerator for SequentialIds {
    fn next_battle_id(&self) -> BattleId {
        BattleId(self.next_uuid())
    }

    fn next_player_id(&self) -> PlayerId {
        PlayerId(self.next_uuid())
    }
}
