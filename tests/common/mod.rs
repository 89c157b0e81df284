#![allow(dead_code)]

use std::sync::Arc;

use battleship_engine::{
    BattleId, Engine, FixedClock, Location, Orientation, Placement, PlayerIndex, SequentialIds,
    ShipType, Stores,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn loc(s: &str) -> Location {
    s.parse().unwrap()
}

/// Engine over fresh in-memory stores with a frozen clock and counter ids.
pub fn engine() -> Engine {
    Engine::new(
        Stores::in_memory(),
        Arc::new(FixedClock(t0())),
        Arc::new(SequentialIds::new()),
    )
}

/// Every ship laid along a row, starting at column 0 on rows A, C, E, G, I.
/// Rows B, D, F, H, J stay empty.
pub fn standard_layout() -> Vec<Placement> {
    ShipType::ALL
        .iter()
        .enumerate()
        .map(|(i, &ship_type)| Placement {
            ship_type,
            origin: Location::new(0, 2 * i as u8).unwrap(),
            orientation: Orientation::Row,
        })
        .collect()
}

/// Registers John and Jane and creates a battle still in deployment.
pub fn new_battle(engine: &Engine) -> BattleId {
    let john = engine.register_player("John").unwrap();
    let jane = engine.register_player("Jane").unwrap();
    engine.create_battle(john.id(), jane.id(), None).unwrap().id()
}

/// A battle with both fleets deployed in the standard layout.
pub fn fighting_battle(engine: &Engine) -> BattleId {
    let battle = new_battle(engine);
    for player in PlayerIndex::BOTH {
        engine
            .deploy_fleet(battle, player, &standard_layout())
            .unwrap();
    }
    battle
}

/// Cells occupied by the standard layout, ship by ship.
pub fn standard_cells() -> Vec<Location> {
    standard_layout()
        .iter()
        .flat_map(|p| {
            (0..p.ship_type.length()).map(move |dx| Location::new(dx as u8, p.origin.y()).unwrap())
        })
        .collect()
}

/// Cells the standard layout never covers.
pub fn empty_cells() -> Vec<Location> {
    let taken = standard_cells();
    Location::all().filter(|c| !taken.contains(c)).collect()
}
