use std::sync::Arc;

use anyhow::anyhow;
use battleship_engine::{init_logging, random_layout, BattleStatus, Engine, Location, PlayerIndex};
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Play random battles against one shared engine",
    long_about = None
)]
struct Cli {
    /// Number of battles to play.
    #[arg(long, default_value_t = 4)]
    battles: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Upper bound on battles running at the same time.
    #[arg(long, default_value_t = 4)]
    workers: usize,
}

/// Registers two players, deploys random layouts and has both sides fire at
/// shuffled cells until one fleet is gone.
fn play(engine: &Engine, index: usize, seed: u64) -> anyhow::Result<serde_json::Value> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let p1 = engine.register_player(&format!("admiral-{}-a", index))?;
    let p2 = engine.register_player(&format!("admiral-{}-b", index))?;
    let battle = engine.create_battle(p1.id(), p2.id(), None)?;

    let mut targets: [Vec<Location>; 2] = Default::default();
    for (player, cells) in PlayerIndex::BOTH.into_iter().zip(targets.iter_mut()) {
        let layout = random_layout(&mut rng)?;
        engine.deploy_fleet(battle.id(), player, &layout)?;
        *cells = Location::all().collect();
        cells.shuffle(&mut rng);
    }

    let mut shots = 0usize;
    loop {
        let state = engine.battle(battle.id())?;
        if state.status() == BattleStatus::Finished {
            break;
        }
        let shooter = state.next_player();
        let cells = match shooter {
            PlayerIndex::First => &mut targets[0],
            PlayerIndex::Second => &mut targets[1],
        };
        let target = cells
            .pop()
            .ok_or_else(|| anyhow!("{} ran out of targets", shooter))?;
        engine.shoot(battle.id(), shooter, target)?;
        shots += 1;
    }

    let finished = engine.battle(battle.id())?;
    info!(
        "battle {} won by {:?} after {} turns",
        finished.id(),
        finished.winner(),
        finished.turn()
    );
    Ok(json!({
        "battle": finished.id().to_string(),
        "winner": finished.winner().map(|w| w.to_string()),
        "turns": finished.turn(),
        "shots": shots,
    }))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut seed_rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let seeds: Vec<u64> = (0..cli.battles).map(|_| seed_rng.random()).collect();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .max_blocking_threads(cli.workers.max(1))
        .build()?;
    let engine = Arc::new(Engine::in_memory());

    let results = runtime.block_on(async {
        let handles: Vec<_> = seeds
            .into_iter()
            .enumerate()
            .map(|(index, seed)| {
                let engine = Arc::clone(&engine);
                tokio::task::spawn_blocking(move || play(&engine, index, seed))
            })
            .collect();
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await??);
        }
        Ok::<_, anyhow::Error>(results)
    })?;

    println!("{}", serde_json::to_string(&json!({ "battles": results }))?);
    Ok(())
}
