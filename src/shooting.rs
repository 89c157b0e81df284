//! Shot resolution.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::battle::{BattleId, BattleStatus};
use crate::common::{Location, PlayerIndex, ShotResult};
use crate::engine::Engine;
use crate::error::ShootError;
use crate::fleet::{FleetId, FleetStatus};

/// What a shot did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotReport {
    pub result: ShotResult,
    /// The shot destroyed the last ship of the opposing fleet.
    pub victorious: bool,
}

impl ShotReport {
    fn new(result: ShotResult) -> Self {
        Self {
            result,
            victorious: false,
        }
    }
}

impl Engine {
    /// Fire at `target` on behalf of `shooter`.
    ///
    /// A repeated target is reported as [`ShotResult::AlreadyShot`] and leaves
    /// every entity, including the turn, untouched.
    pub fn shoot(
        &self,
        battle_id: BattleId,
        shooter: PlayerIndex,
        target: Location,
    ) -> Result<ShotReport, ShootError> {
        self.locks
            .with_battle(battle_id, || self.shoot_locked(battle_id, shooter, target))
            .inspect_err(|e| warn!("shot in battle {} rejected: {}", battle_id, e))
    }

    fn shoot_locked(
        &self,
        battle_id: BattleId,
        shooter: PlayerIndex,
        target: Location,
    ) -> Result<ShotReport, ShootError> {
        let battle = self.battle(battle_id)?;
        if battle.status() != BattleStatus::Fighting {
            return Err(ShootError::IllegalBattleStatus {
                expected: BattleStatus::Fighting,
                actual: battle.status(),
            });
        }
        if shooter != battle.next_player() {
            return Err(ShootError::NotPlayerTurn(shooter));
        }

        let own_fleet = self.fleet(FleetId::new(battle_id, shooter))?;
        let target_fleet = self.fleet(own_fleet.id().opponent())?;

        if own_fleet.has_shot_at(target) {
            debug!("battle {}: {} already fired at {}", battle_id, shooter, target);
            return Ok(ShotReport::new(ShotResult::AlreadyShot));
        }
        let own_fleet = own_fleet.with_shot(target);

        let mut ships = self.ships_of(target_fleet.id());
        let struck = ships.iter_mut().find(|s| s.occupies(target)).map(|ship| {
            let result = ship.hit_at(target);
            (ship.clone(), result)
        });
        let result = struck.as_ref().map_or(ShotResult::Missed, |(_, r)| *r);
        debug!("battle {}: {} fired at {}: {:?}", battle_id, shooter, target, result);

        let now = self.clock.now();
        let mut victorious = false;
        let mut target_update = None;
        if let Some((ship, result)) = struck {
            if result.is_hit() {
                let status = FleetStatus::of_ships(&ships);
                if status != target_fleet.status() {
                    victorious = status == FleetStatus::Destroyed;
                    target_update = Some(target_fleet.with_status(status));
                }
                self.stores.ships.save(ship);
            }
        }

        let battle = if victorious {
            info!("battle {}: {} destroyed the opposing fleet", battle_id, shooter);
            battle.finish(shooter, now)
        } else {
            battle.after_shot(shooter, now)
        };

        self.stores.fleets.save(own_fleet);
        if let Some(fleet) = target_update {
            self.stores.fleets.save(fleet);
        }
        self.stores.battles.save(battle);

        Ok(ShotReport { result, victorious })
    }
}
