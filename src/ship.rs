//! Ship catalog and the ship entity with its hit tracking.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::battle::BattleId;
use crate::common::{Location, Orientation, PlayerIndex, ShotResult};
use crate::config::NUM_SHIPS;
use crate::fleet::FleetId;
use crate::grid::{compute_footprint, GridError};
use crate::store::Entity;

/// The fixed catalog of ship types; a complete fleet holds one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    pub const ALL: [ShipType; NUM_SHIPS] = [
        ShipType::Carrier,
        ShipType::Battleship,
        ShipType::Cruiser,
        ShipType::Submarine,
        ShipType::Destroyer,
    ];

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser | ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Cruiser => "Cruiser",
            ShipType::Submarine => "Submarine",
            ShipType::Destroyer => "Destroyer",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primary key of a ship: one ship per type per fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId {
    battle: BattleId,
    player: PlayerIndex,
    ship_type: ShipType,
}

impl ShipId {
    pub fn new(battle: BattleId, player: PlayerIndex, ship_type: ShipType) -> Self {
        Self {
            battle,
            player,
            ship_type,
        }
    }

    pub fn battle(&self) -> BattleId {
        self.battle
    }

    pub fn player(&self) -> PlayerIndex {
        self.player
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Key of the fleet this ship belongs to.
    pub fn fleet(&self) -> FleetId {
        FleetId::new(self.battle, self.player)
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.battle, self.player, self.ship_type)
    }
}

/// Structural condition of a ship, derived from its hit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    Unharmed,
    Damaged,
    Destroyed,
}

impl ShipStatus {
    pub fn from_hits(hits: usize, length: usize) -> Self {
        if hits == 0 {
            ShipStatus::Unharmed
        } else if hits >= length {
            ShipStatus::Destroyed
        } else {
            ShipStatus::Damaged
        }
    }
}

/// A ship deployed in a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    id: ShipId,
    origin: Location,
    orientation: Orientation,
    footprint: Vec<Location>,
    hits: BTreeSet<Location>,
}

impl Ship {
    /// Place an unharmed ship. Fails when its footprint leaves the grid.
    pub fn new(id: ShipId, origin: Location, orientation: Orientation) -> Result<Self, GridError> {
        let footprint = compute_footprint(origin, orientation, id.ship_type().length())?;
        Ok(Ship {
            id,
            origin,
            orientation,
            footprint,
            hits: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn ship_type(&self) -> ShipType {
        self.id.ship_type()
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells, starting at the origin.
    pub fn footprint(&self) -> &[Location] {
        &self.footprint
    }

    pub fn hits(&self) -> &BTreeSet<Location> {
        &self.hits
    }

    pub fn length(&self) -> usize {
        self.footprint.len()
    }

    pub fn occupies(&self, location: Location) -> bool {
        self.footprint.contains(&location)
    }

    /// Register a shot at `location` and report what it did to this ship.
    pub fn hit_at(&mut self, location: Location) -> ShotResult {
        if !self.occupies(location) {
            return ShotResult::Missed;
        }
        if !self.hits.insert(location) {
            return ShotResult::AlreadyShot;
        }
        if self.hits.len() == self.length() {
            ShotResult::Sunk
        } else {
            ShotResult::Hit
        }
    }

    pub fn status(&self) -> ShipStatus {
        ShipStatus::from_hits(self.hits.len(), self.length())
    }

    pub fn is_sunk(&self) -> bool {
        self.status() == ShipStatus::Destroyed
    }
}

impl Entity for Ship {
    type Key = ShipId;
    const KIND: &'static str = "ship";

    fn key(&self) -> ShipId {
        self.id
    }
}
