//! A player's fleet within one battle and the shots that player has fired.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::battle::BattleId;
use crate::common::{Location, PlayerIndex};
use crate::config::NUM_SHIPS;
use crate::ship::{Ship, ShipStatus};
use crate::store::Entity;

/// Primary key of a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FleetId {
    battle: BattleId,
    player: PlayerIndex,
}

impl FleetId {
    pub fn new(battle: BattleId, player: PlayerIndex) -> Self {
        Self { battle, player }
    }

    pub fn battle(&self) -> BattleId {
        self.battle
    }

    pub fn player(&self) -> PlayerIndex {
        self.player
    }

    /// Fleet of the other player in the same battle.
    pub fn opponent(&self) -> FleetId {
        FleetId::new(self.battle, self.player.opponent())
    }
}

impl fmt::Display for FleetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.battle, self.player)
    }
}

/// Aggregate condition of a fleet. Variants are ordered by severity and a
/// fleet only ever moves forward through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FleetStatus {
    /// Fewer than one ship of every type deployed.
    NotDeployed,
    /// Fully deployed and every ship unharmed.
    Operational,
    Damaged,
    /// Every ship sunk.
    Destroyed,
}

impl FleetStatus {
    /// Status a fleet made of `ships` must report.
    pub fn of_ships(ships: &[Ship]) -> Self {
        if ships.len() < NUM_SHIPS {
            FleetStatus::NotDeployed
        } else if ships.iter().all(|s| s.status() == ShipStatus::Unharmed) {
            FleetStatus::Operational
        } else if ships.iter().all(Ship::is_sunk) {
            FleetStatus::Destroyed
        } else {
            FleetStatus::Damaged
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    id: FleetId,
    shots: BTreeSet<Location>,
    status: FleetStatus,
}

impl Fleet {
    /// An empty fleet awaiting deployment.
    pub fn new(id: FleetId) -> Self {
        Self {
            id,
            shots: BTreeSet::new(),
            status: FleetStatus::NotDeployed,
        }
    }

    pub fn id(&self) -> FleetId {
        self.id
    }

    pub fn status(&self) -> FleetStatus {
        self.status
    }

    /// Cells this fleet's player has fired at.
    pub fn shots(&self) -> &BTreeSet<Location> {
        &self.shots
    }

    pub fn has_shot_at(&self, location: Location) -> bool {
        self.shots.contains(&location)
    }

    /// Next value with `location` added to the shot record.
    pub fn with_shot(mut self, location: Location) -> Self {
        self.shots.insert(location);
        self
    }

    /// Next value with `status`. A destroyed fleet stays destroyed.
    pub fn with_status(mut self, status: FleetStatus) -> Self {
        if self.status != FleetStatus::Destroyed {
            self.status = status;
        }
        self
    }
}

impl Entity for Fleet {
    type Key = FleetId;
    const KIND: &'static str = "fleet";

    fn key(&self) -> FleetId {
        self.id
    }
}
