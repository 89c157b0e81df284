//! Common types for the battle engine: grid cells, orientation, player slots
//! and shot results.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;
use crate::grid::GridError;

/// A single cell of the grid, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    x: u8,
    y: u8,
}

impl Location {
    /// Create a location, failing when either coordinate is off the grid.
    pub fn new(x: u8, y: u8) -> Result<Self, GridError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(GridError::OutOfGrid {
                x: x as usize,
                y: y as usize,
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Iterate every cell of the grid, row by row.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Location { x, y }))
    }
}

/// Board notation: row letter followed by column digit, e.g. `"C7"`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.y) as char, self.x)
    }
}

/// Errors produced while parsing a [`Location`] from board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLocationError {
    #[error("expected a row letter A-J followed by a column digit 0-9, got {0:?}")]
    Malformed(String),
}

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseLocationError::Malformed(s.to_string());
        let mut chars = s.trim().chars();
        let (row, col) = match (chars.next(), chars.next(), chars.next()) {
            (Some(row), Some(col), None) => (row.to_ascii_uppercase(), col),
            _ => return Err(malformed()),
        };
        if !row.is_ascii_uppercase() || !col.is_ascii_digit() {
            return Err(malformed());
        }
        let y = row as u8 - b'A';
        let x = col as u8 - b'0';
        Location::new(x, y).map_err(|_| malformed())
    }
}

/// Direction a ship extends from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Along increasing `x`.
    Row,
    /// Along increasing `y`.
    Column,
}

/// Which of the two battle slots a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerIndex {
    First,
    Second,
}

impl PlayerIndex {
    pub const BOTH: [PlayerIndex; 2] = [PlayerIndex::First, PlayerIndex::Second];

    /// The other slot.
    pub fn opponent(self) -> Self {
        match self {
            PlayerIndex::First => PlayerIndex::Second,
            PlayerIndex::Second => PlayerIndex::First,
        }
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerIndex::First => write!(f, "FIRST"),
            PlayerIndex::Second => write!(f, "SECOND"),
        }
    }
}

/// Outcome of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    /// No ship occupies the target cell.
    Missed,
    /// The cell was fired at before; nothing changed.
    AlreadyShot,
    /// A ship was struck but still floats.
    Hit,
    /// The shot struck the last intact segment of a ship.
    Sunk,
}

impl ShotResult {
    /// `true` for results that damaged a ship.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sunk)
    }
}
