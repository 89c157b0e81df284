//! Random fleet layouts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::{Location, Orientation};
use crate::config::BOARD_SIZE;
use crate::grid::{compute_footprint, intersects};
use crate::ship::ShipType;

const MAX_ATTEMPTS: usize = 100;

/// Where and how a ship is to be deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub ship_type: ShipType,
    pub origin: Location,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("no free position found for {0}")]
    Exhausted(ShipType),
}

/// Returns a random in-grid (origin, orientation) for `ship_type` that avoids
/// every `occupied` cell.
pub fn random_placement<R: Rng>(
    rng: &mut R,
    ship_type: ShipType,
    occupied: &[Location],
) -> Result<Placement, PlacementError> {
    let len = ship_type.length() as u8;
    for _ in 0..MAX_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Row
        } else {
            Orientation::Column
        };
        let (max_x, max_y) = match orientation {
            Orientation::Row => (BOARD_SIZE - len, BOARD_SIZE - 1),
            Orientation::Column => (BOARD_SIZE - 1, BOARD_SIZE - len),
        };
        let x = rng.random_range(0..=max_x);
        let y = rng.random_range(0..=max_y);
        let Ok(origin) = Location::new(x, y) else {
            continue;
        };
        let Ok(cells) = compute_footprint(origin, orientation, ship_type.length()) else {
            continue;
        };
        if !intersects(&cells, occupied) {
            return Ok(Placement {
                ship_type,
                origin,
                orientation,
            });
        }
    }
    Err(PlacementError::Exhausted(ship_type))
}

/// One non-overlapping placement per ship type, in catalog order.
pub fn random_layout<R: Rng>(rng: &mut R) -> Result<Vec<Placement>, PlacementError> {
    let mut occupied = Vec::new();
    let mut layout = Vec::with_capacity(ShipType::ALL.len());
    for ship_type in ShipType::ALL {
        let placement = random_placement(rng, ship_type, &occupied)?;
        if let Ok(cells) =
            compute_footprint(placement.origin, placement.orientation, ship_type.length())
        {
            occupied.extend(cells);
        }
        layout.push(placement);
    }
    Ok(layout)
}
