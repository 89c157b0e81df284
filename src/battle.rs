//! The match aggregate and its lifecycle.
//!
//! A battle moves `Deployment -> Fighting -> Finished` and never back.
//! Transitions are expressed as methods that consume the current value and
//! return the next one, so callers persist whole values only.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::PlayerIndex;
use crate::error::CreateBattleError;
use crate::player::PlayerId;
use crate::store::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BattleId(pub Uuid);

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleStatus {
    Deployment,
    Fighting,
    Finished,
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleStatus::Deployment => write!(f, "DEPLOYMENT"),
            BattleStatus::Fighting => write!(f, "FIGHTING"),
            BattleStatus::Finished => write!(f, "FINISHED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    id: BattleId,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    players: [PlayerId; 2],
    status: BattleStatus,
    next_player: PlayerIndex,
    turn: u32,
    winner: Option<PlayerIndex>,
}

impl Battle {
    /// A fresh battle in deployment. The two players must differ.
    pub fn new(
        id: BattleId,
        player1: PlayerId,
        player2: PlayerId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CreateBattleError> {
        if player1 == player2 {
            return Err(CreateBattleError::SamePlayers(player1));
        }
        Ok(Battle {
            id,
            created_at,
            started_at: None,
            stopped_at: None,
            players: [player1, player2],
            status: BattleStatus::Deployment,
            next_player: PlayerIndex::First,
            turn: 0,
            winner: None,
        })
    }

    pub fn id(&self) -> BattleId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the first shot.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Slot whose fleet fires next.
    pub fn next_player(&self) -> PlayerIndex {
        self.next_player
    }

    /// Completed rounds; bumped after the second player's shot.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn winner(&self) -> Option<PlayerIndex> {
        self.winner
    }

    pub fn player_id(&self, index: PlayerIndex) -> PlayerId {
        match index {
            PlayerIndex::First => self.players[0],
            PlayerIndex::Second => self.players[1],
        }
    }

    /// Both fleets deployed: open fire.
    pub fn begin_fighting(mut self) -> Self {
        if self.status == BattleStatus::Deployment {
            self.status = BattleStatus::Fighting;
        }
        self
    }

    /// Hand the turn over after a shot by `shooter` that did not end the battle.
    pub fn after_shot(mut self, shooter: PlayerIndex, now: DateTime<Utc>) -> Self {
        self.started_at.get_or_insert(now);
        match shooter {
            PlayerIndex::First => self.next_player = PlayerIndex::Second,
            PlayerIndex::Second => {
                self.next_player = PlayerIndex::First;
                self.turn += 1;
            }
        }
        self
    }

    /// `winner` just destroyed the opposing fleet. Turn state is left as is.
    pub fn finish(mut self, winner: PlayerIndex, now: DateTime<Utc>) -> Self {
        self.started_at.get_or_insert(now);
        self.status = BattleStatus::Finished;
        self.stopped_at = Some(now);
        self.winner = Some(winner);
        self
    }
}

impl Entity for Battle {
    type Key = BattleId;
    const KIND: &'static str = "battle";

    fn key(&self) -> BattleId {
        self.id
    }
}
