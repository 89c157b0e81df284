mod common;

use std::sync::Arc;

use battleship_engine::{
    BattleStatus, DeployError, Engine, ErrorKind, FixedClock, FleetId, FleetStatus,
    InMemoryRepository, NotFound, Orientation, Player, PlayerIndex, SequentialIds, ShipId,
    ShipType, Stores,
};
use common::{engine, fighting_battle, loc, new_battle, standard_layout, t0};

#[test]
fn test_new_battle_provisions_two_empty_fleets() {
    let engine = engine();
    let battle_id = new_battle(&engine);
    let battle = engine.battle(battle_id).unwrap();
    assert_eq!(battle.status(), BattleStatus::Deployment);
    assert_eq!(battle.turn(), 0);
    assert_eq!(battle.next_player(), PlayerIndex::First);
    assert_eq!(battle.created_at(), common::t0());
    assert!(battle.started_at().is_none());
    for player in PlayerIndex::BOTH {
        let fleet = engine.fleet(FleetId::new(battle_id, player)).unwrap();
        assert_eq!(fleet.status(), FleetStatus::NotDeployed);
        assert!(fleet.shots().is_empty());
        assert!(engine.fleet_ships(fleet.id()).unwrap().is_empty());
    }
}

#[test]
fn test_deploy_stores_ship() {
    let engine = engine();
    let battle = new_battle(&engine);
    engine
        .deploy_ship(
            battle,
            PlayerIndex::Second,
            ShipType::Battleship,
            loc("C4"),
            Orientation::Column,
        )
        .unwrap();

    let id = ShipId::new(battle, PlayerIndex::Second, ShipType::Battleship);
    let ship = engine.ship(id).unwrap();
    assert_eq!(ship.footprint(), &[loc("C4"), loc("D4"), loc("E4"), loc("F4")]);
    let mirrored = ShipId::new(battle, PlayerIndex::First, ShipType::Battleship);
    assert!(engine.ship(mirrored).is_err());
    assert!(!engine.is_fleet_complete(id.fleet()).unwrap());
}

#[test]
fn test_deploy_unknown_battle() {
    let engine = engine();
    let other = common::engine();
    let foreign = new_battle(&other);
    let err = engine
        .deploy_ship(
            foreign,
            PlayerIndex::First,
            ShipType::Carrier,
            loc("A0"),
            Orientation::Row,
        )
        .unwrap_err();
    assert_eq!(err, DeployError::NotFound(NotFound::Battle(foreign)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_deploy_off_grid_persists_nothing() {
    let engine = engine();
    let battle = new_battle(&engine);
    let err = engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Carrier,
            loc("J9"),
            Orientation::Column,
        )
        .unwrap_err();
    assert_eq!(
        err,
        DeployError::ShipOutOfGrid {
            ship_type: ShipType::Carrier,
            origin: loc("J9"),
            orientation: Orientation::Column,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidPlacement);
    let fleet = FleetId::new(battle, PlayerIndex::First);
    assert!(engine.fleet_ships(fleet).unwrap().is_empty());
}

#[test]
fn test_deploy_same_type_twice() {
    let engine = engine();
    let battle = new_battle(&engine);
    engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Cruiser,
            loc("A0"),
            Orientation::Row,
        )
        .unwrap();
    let err = engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Cruiser,
            loc("H0"),
            Orientation::Row,
        )
        .unwrap_err();
    let id = ShipId::new(battle, PlayerIndex::First, ShipType::Cruiser);
    assert_eq!(err, DeployError::ShipAlreadyDeployed(id));
    assert_eq!(engine.ship(id).unwrap().origin(), loc("A0"));
}

#[test]
fn test_deploy_overlap_within_fleet() {
    let engine = engine();
    let battle = new_battle(&engine);
    engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Carrier,
            loc("C0"),
            Orientation::Row,
        )
        .unwrap();
    let err = engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Submarine,
            loc("A2"),
            Orientation::Column,
        )
        .unwrap_err();
    assert_eq!(
        err,
        DeployError::ShipOverlap {
            ship_type: ShipType::Submarine,
            colliding: ShipType::Carrier,
        }
    );
    // Fleets do not share a board.
    engine
        .deploy_ship(
            battle,
            PlayerIndex::Second,
            ShipType::Submarine,
            loc("A2"),
            Orientation::Column,
        )
        .unwrap();
}

#[test]
fn test_completion_promotes_fleets_then_battle() {
    let engine = engine();
    let battle = new_battle(&engine);
    let first = FleetId::new(battle, PlayerIndex::First);
    let second = FleetId::new(battle, PlayerIndex::Second);

    engine
        .deploy_fleet(battle, PlayerIndex::First, &standard_layout())
        .unwrap();
    assert!(engine.is_fleet_complete(first).unwrap());
    assert_eq!(engine.fleet(first).unwrap().status(), FleetStatus::Operational);
    assert_eq!(engine.fleet(second).unwrap().status(), FleetStatus::NotDeployed);
    assert_eq!(engine.battle(battle).unwrap().status(), BattleStatus::Deployment);

    engine
        .deploy_fleet(battle, PlayerIndex::Second, &standard_layout())
        .unwrap();
    assert_eq!(engine.fleet(second).unwrap().status(), FleetStatus::Operational);
    let battle = engine.battle(battle).unwrap();
    assert_eq!(battle.status(), BattleStatus::Fighting);
    assert_eq!(battle.turn(), 0);
    assert_eq!(battle.next_player(), PlayerIndex::First);
}

#[test]
fn test_deploy_after_deployment_phase() {
    let engine = engine();
    let battle = fighting_battle(&engine);
    let err = engine
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Carrier,
            loc("J0"),
            Orientation::Row,
        )
        .unwrap_err();
    assert_eq!(
        err,
        DeployError::IllegalBattleStatus {
            expected: BattleStatus::Deployment,
            actual: BattleStatus::Fighting,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_fleet_ships_in_catalog_order() {
    let engine = engine();
    let battle = new_battle(&engine);
    let mut layout = standard_layout();
    layout.reverse();
    engine.deploy_fleet(battle, PlayerIndex::First, &layout).unwrap();
    let types: Vec<_> = engine
        .fleet_ships(FleetId::new(battle, PlayerIndex::First))
        .unwrap()
        .iter()
        .map(|s| s.ship_type())
        .collect();
    assert_eq!(types, ShipType::ALL.to_vec());
}

#[test]
fn test_deploy_for_vanished_player() {
    let stores = Stores::in_memory();
    let engine = Engine::new(
        stores.clone(),
        Arc::new(FixedClock(t0())),
        Arc::new(SequentialIds::new()),
    );
    let battle = new_battle(&engine);
    let john = engine.battle(battle).unwrap().player_id(PlayerIndex::First);

    let without_players = Engine::new(
        Stores {
            players: Arc::new(InMemoryRepository::<Player>::new()),
            ..stores
        },
        Arc::new(FixedClock(t0())),
        Arc::new(SequentialIds::new()),
    );
    let err = without_players
        .deploy_ship(
            battle,
            PlayerIndex::First,
            ShipType::Carrier,
            loc("A0"),
            Orientation::Row,
        )
        .unwrap_err();
    assert_eq!(err, DeployError::NotFound(NotFound::Player(john)));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let id = ShipId::new(battle, PlayerIndex::First, ShipType::Carrier);
    assert!(engine.ship(id).is_err());
    assert!(engine.fleet_ships(id.fleet()).unwrap().is_empty());
}

#[test]
fn test_fleet_ships_stay_within_their_battle() {
    let engine = engine();
    let first = new_battle(&engine);
    let a = engine.register_player("Ann").unwrap();
    let b = engine.register_player("Bob").unwrap();
    let second = engine.create_battle(a.id(), b.id(), None).unwrap().id();

    engine
        .deploy_fleet(first, PlayerIndex::Second, &standard_layout())
        .unwrap();
    engine
        .deploy_fleet(second, PlayerIndex::First, &standard_layout())
        .unwrap();

    for (battle, player) in [(first, PlayerIndex::Second), (second, PlayerIndex::First)] {
        let ships = engine.fleet_ships(FleetId::new(battle, player)).unwrap();
        assert_eq!(ships.len(), ShipType::ALL.len());
        assert!(ships.iter().all(|s| s.id().fleet() == FleetId::new(battle, player)));
    }
    for (battle, player) in [(first, PlayerIndex::First), (second, PlayerIndex::Second)] {
        assert!(engine
            .fleet_ships(FleetId::new(battle, player))
            .unwrap()
            .is_empty());
    }
}
