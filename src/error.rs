//! Error types returned by engine operations.
//!
//! Each use case has its own enum carrying structured payloads; `kind()`
//! classifies any of them for callers that only need the broad category.

use thiserror::Error;

use crate::battle::{BattleId, BattleStatus};
use crate::common::{Location, Orientation, PlayerIndex};
use crate::fleet::FleetId;
use crate::player::PlayerId;
use crate::ship::{ShipId, ShipType};

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced battle, fleet, ship or player does not exist.
    NotFound,
    /// The action is not allowed in the current phase or turn.
    InvalidState,
    /// A ship placement was rejected.
    InvalidPlacement,
    /// Arguments violate a construction precondition.
    Precondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("battle {0} not found")]
    Battle(BattleId),
    #[error("fleet {0} not found")]
    Fleet(FleetId),
    #[error("ship {0} not found")]
    Ship(ShipId),
    #[error("player {0} not found")]
    Player(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterPlayerError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("player name {0:?} is already taken")]
    NameTaken(String),
}

impl RegisterPlayerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegisterPlayerError::EmptyName => ErrorKind::Precondition,
            RegisterPlayerError::NameTaken(_) => ErrorKind::InvalidState,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateBattleError {
    #[error("a battle needs two different players, got {0} twice")]
    SamePlayers(PlayerId),
    #[error("player named {0:?} not found")]
    UnknownPlayerName(String),
    #[error(transparent)]
    NotFound(#[from] NotFound),
}

impl CreateBattleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CreateBattleError::SamePlayers(_) => ErrorKind::Precondition,
            CreateBattleError::UnknownPlayerName(_) | CreateBattleError::NotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("battle is {actual}, expected {expected}")]
    IllegalBattleStatus {
        expected: BattleStatus,
        actual: BattleStatus,
    },
    #[error("{ship_type} at {origin} ({orientation:?}) does not fit on the grid")]
    ShipOutOfGrid {
        ship_type: ShipType,
        origin: Location,
        orientation: Orientation,
    },
    #[error("ship {0} is already deployed")]
    ShipAlreadyDeployed(ShipId),
    #[error("{ship_type} overlaps the {colliding}")]
    ShipOverlap {
        ship_type: ShipType,
        colliding: ShipType,
    },
}

impl DeployError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeployError::NotFound(_) => ErrorKind::NotFound,
            DeployError::IllegalBattleStatus { .. } => ErrorKind::InvalidState,
            DeployError::ShipOutOfGrid { .. }
            | DeployError::ShipAlreadyDeployed(_)
            | DeployError::ShipOverlap { .. } => ErrorKind::InvalidPlacement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShootError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("battle is {actual}, expected {expected}")]
    IllegalBattleStatus {
        expected: BattleStatus,
        actual: BattleStatus,
    },
    #[error("it is not {0}'s turn")]
    NotPlayerTurn(PlayerIndex),
}

impl ShootError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShootError::NotFound(_) => ErrorKind::NotFound,
            ShootError::IllegalBattleStatus { .. } | ShootError::NotPlayerTurn(_) => {
                ErrorKind::InvalidState
            }
        }
    }
}
