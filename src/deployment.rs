//! Ship deployment.

use log::{info, warn};

use crate::battle::{BattleId, BattleStatus};
use crate::common::{Location, Orientation, PlayerIndex};
use crate::engine::Engine;
use crate::error::{DeployError, NotFound};
use crate::fleet::{FleetId, FleetStatus};
use crate::grid::intersects;
use crate::placement::Placement;
use crate::ship::{Ship, ShipId, ShipType};

impl Engine {
    /// Place one ship for `player` in a battle still in deployment.
    ///
    /// Once both fleets hold every ship type they become operational and the
    /// battle moves to fighting. Nothing is written when any check fails.
    pub fn deploy_ship(
        &self,
        battle_id: BattleId,
        player: PlayerIndex,
        ship_type: ShipType,
        origin: Location,
        orientation: Orientation,
    ) -> Result<(), DeployError> {
        self.locks.with_battle(battle_id, || {
            self.deploy_locked(battle_id, player, ship_type, origin, orientation)
        })
        .inspect_err(|e| warn!("deployment in battle {} rejected: {}", battle_id, e))
    }

    /// Deploy each placement in order, stopping at the first failure. Ships
    /// deployed before the failure stay deployed.
    pub fn deploy_fleet(
        &self,
        battle_id: BattleId,
        player: PlayerIndex,
        placements: &[Placement],
    ) -> Result<(), DeployError> {
        placements.iter().try_for_each(|p| {
            self.deploy_ship(battle_id, player, p.ship_type, p.origin, p.orientation)
        })
    }

    fn deploy_locked(
        &self,
        battle_id: BattleId,
        player: PlayerIndex,
        ship_type: ShipType,
        origin: Location,
        orientation: Orientation,
    ) -> Result<(), DeployError> {
        let battle = self.battle(battle_id)?;
        if battle.status() != BattleStatus::Deployment {
            return Err(DeployError::IllegalBattleStatus {
                expected: BattleStatus::Deployment,
                actual: battle.status(),
            });
        }

        let player_id = battle.player_id(player);
        if !self.stores.players.contains(&player_id) {
            return Err(NotFound::Player(player_id).into());
        }

        let id = ShipId::new(battle_id, player, ship_type);
        let ship = Ship::new(id, origin, orientation).map_err(|_| DeployError::ShipOutOfGrid {
            ship_type,
            origin,
            orientation,
        })?;

        if self.stores.ships.contains(&id) {
            return Err(DeployError::ShipAlreadyDeployed(id));
        }
        if let Some(other) = self
            .ships_of(id.fleet())
            .into_iter()
            .find(|other| intersects(other.footprint(), ship.footprint()))
        {
            return Err(DeployError::ShipOverlap {
                ship_type,
                colliding: other.ship_type(),
            });
        }

        let fleets = [
            self.fleet(FleetId::new(battle_id, PlayerIndex::First))?,
            self.fleet(FleetId::new(battle_id, PlayerIndex::Second))?,
        ];

        self.stores
            .ships
            .insert(ship)
            .map_err(|_| DeployError::ShipAlreadyDeployed(id))?;
        info!(
            "battle {}: {} deployed {} at {} ({:?})",
            battle_id, player, ship_type, origin, orientation
        );

        let mut ready = 0;
        for fleet in fleets {
            let complete = self.ships_of(fleet.id()).len() == ShipType::ALL.len();
            if complete && fleet.status() == FleetStatus::NotDeployed {
                let index = fleet.id().player();
                self.stores
                    .fleets
                    .save(fleet.with_status(FleetStatus::Operational));
                info!("battle {}: fleet {} is operational", battle_id, index);
                ready += 1;
            } else if fleet.status() == FleetStatus::Operational {
                ready += 1;
            }
        }

        if ready == PlayerIndex::BOTH.len() {
            self.stores.battles.save(battle.begin_fighting());
            info!("battle {}: both fleets deployed, fighting begins", battle_id);
        }
        Ok(())
    }
}
