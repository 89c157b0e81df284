mod battle;
mod clock;
mod common;
mod config;
mod deployment;
mod engine;
mod error;
mod fleet;
mod grid;
mod ids;
mod lock;
mod logging;
mod placement;
mod player;
pub mod prelude;
mod ship;
mod shooting;
pub mod store;

pub use battle::*;
pub use clock::*;
pub use common::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use fleet::*;
pub use grid::*;
pub use ids::*;
pub use lock::*;
pub use logging::{init_logging, log_level};
pub use placement::*;
pub use player::*;
pub use ship::*;
pub use shooting::*;
pub use store::*;
