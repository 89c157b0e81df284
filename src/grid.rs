//! Segment geometry on the fixed-size grid.

use crate::common::{Location, Orientation};
use crate::config::{BOARD_SIZE, MAX_SEGMENT_LENGTH};

/// Errors returned by geometry helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A generated cell falls outside `[0, BOARD_SIZE)` on some axis.
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfGrid { x: usize, y: usize },
    /// Segment length is not in `[1, MAX_SEGMENT_LENGTH]`.
    #[error("segment length {0} is not between 1 and {}", MAX_SEGMENT_LENGTH)]
    InvalidLength(usize),
}

/// Cells covered by a segment of `length` starting at `origin`, in order.
pub fn compute_footprint(
    origin: Location,
    orientation: Orientation,
    length: usize,
) -> Result<Vec<Location>, GridError> {
    if length == 0 || length > MAX_SEGMENT_LENGTH {
        return Err(GridError::InvalidLength(length));
    }
    let (x0, y0) = (origin.x() as usize, origin.y() as usize);
    let mut cells = Vec::with_capacity(length);
    for i in 0..length {
        let (x, y) = match orientation {
            Orientation::Row => (x0 + i, y0),
            Orientation::Column => (x0, y0 + i),
        };
        if x >= BOARD_SIZE as usize || y >= BOARD_SIZE as usize {
            return Err(GridError::OutOfGrid { x, y });
        }
        cells.push(Location::new(x as u8, y as u8)?);
    }
    Ok(cells)
}

/// `true` when the two footprints share at least one cell.
pub fn intersects(a: &[Location], b: &[Location]) -> bool {
    a.iter().any(|cell| b.contains(cell))
}
