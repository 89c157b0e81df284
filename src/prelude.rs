//! Commonly used types and utilities for ease of import.

pub use crate::{
    BattleId, BattleStatus, Engine, FleetId, FleetStatus, Location, Orientation, PlayerIndex,
    ShipId, ShipStatus, ShipType, ShotReport, ShotResult,
};
