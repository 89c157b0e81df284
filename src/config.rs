/// Width and height of the square grid.
pub const BOARD_SIZE: u8 = 10;

/// Number of ships in a complete fleet, one per [`crate::ShipType`].
pub const NUM_SHIPS: usize = 5;

/// Longest segment the grid can hold.
pub const MAX_SEGMENT_LENGTH: usize = BOARD_SIZE as usize;

/// Environment variable read by [`crate::init_logging`].
pub const LOG_ENV_VAR: &str = "BATTLESHIP_LOG";
