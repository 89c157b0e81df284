mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use battleship_engine::{BattleId, BattleLocks, FleetId, NotFound, PlayerIndex, ShootError};
use uuid::Uuid;
use common::{empty_cells, engine, fighting_battle};

#[test]
fn test_racing_shots_on_one_battle_are_serialized() {
    const SHOOTERS: usize = 8;
    let engine = Arc::new(engine());
    let battle = fighting_battle(&engine);
    let barrier = Arc::new(Barrier::new(SHOOTERS));

    let handles: Vec<_> = empty_cells()
        .into_iter()
        .take(SHOOTERS)
        .map(|target| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.shoot(battle, PlayerIndex::First, target)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == ShootError::NotPlayerTurn(PlayerIndex::First)));

    let fleet = engine.fleet(FleetId::new(battle, PlayerIndex::First)).unwrap();
    assert_eq!(fleet.shots().len(), 1);
    assert_eq!(engine.battle(battle).unwrap().next_player(), PlayerIndex::Second);
}

#[test]
fn test_independent_battles_progress_in_parallel() {
    let engine = Arc::new(engine());
    let battles: Vec<_> = (0..4)
        .map(|i| {
            let a = engine.register_player(&format!("red-{i}")).unwrap();
            let b = engine.register_player(&format!("blue-{i}")).unwrap();
            let battle = engine.create_battle(a.id(), b.id(), None).unwrap().id();
            for player in PlayerIndex::BOTH {
                engine
                    .deploy_fleet(battle, player, &common::standard_layout())
                    .unwrap();
            }
            battle
        })
        .collect();

    let handles: Vec<_> = battles
        .iter()
        .copied()
        .map(|battle| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for target in empty_cells().into_iter().take(10) {
                    engine.shoot(battle, PlayerIndex::First, target).unwrap();
                    engine.shoot(battle, PlayerIndex::Second, target).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for battle in battles {
        assert_eq!(engine.battle(battle).unwrap().turn(), 10);
    }
}

#[test]
fn test_lock_entries_are_dropped_after_use() {
    let locks = BattleLocks::new();
    for i in 0..10_000u128 {
        let id = BattleId(Uuid::from_u128(i));
        let held = locks.with_battle(id, || locks.len());
        assert_eq!(held, 1);
    }
    assert!(locks.is_empty());
}

#[test]
fn test_unknown_battle_leaves_no_lock_behind() {
    let engine = engine();
    let battle = fighting_battle(&engine);
    for i in 1_000..1_100u128 {
        let unknown = BattleId(Uuid::from_u128(i));
        let err = engine
            .shoot(unknown, PlayerIndex::First, empty_cells()[0])
            .unwrap_err();
        assert_eq!(err, ShootError::NotFound(NotFound::Battle(unknown)));
    }
    // The real battle is still playable afterwards.
    engine
        .shoot(battle, PlayerIndex::First, empty_cells()[0])
        .unwrap();
}

#[test]
fn test_waiters_share_one_lock_entry() {
    let locks = Arc::new(BattleLocks::new());
    let battle = BattleId(Uuid::from_u128(7));
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let locks = Arc::clone(&locks);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                locks.with_battle(battle, || locks.len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    assert!(locks.is_empty());
}
