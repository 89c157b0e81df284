//! Entry point of the rules engine: player registry, battle creation and
//! read accessors. Deployment and shooting live in their own modules.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::battle::{Battle, BattleId};
use crate::clock::{Clock, SystemClock};
use crate::common::PlayerIndex;
use crate::config::NUM_SHIPS;
use crate::error::{CreateBattleError, NotFound, RegisterPlayerError};
use crate::fleet::{Fleet, FleetId};
use crate::ids::{IdGenerator, RandomIds};
use crate::lock::BattleLocks;
use crate::player::{Player, PlayerId};
use crate::ship::{Ship, ShipId, ShipType};
use crate::store::Stores;

/// Battle rules engine over injected stores, clock and id source.
///
/// Every mutating operation on a battle runs under that battle's lock, so
/// concurrent calls against the same battle are applied one at a time while
/// different battles proceed independently.
pub struct Engine {
    pub(crate) stores: Stores,
    pub(crate) clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    pub(crate) locks: BattleLocks,
    registration: Mutex<()>,
}

impl Engine {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            stores,
            clock,
            ids,
            locks: BattleLocks::new(),
            registration: Mutex::new(()),
        }
    }

    /// In-memory stores, wall clock and random ids.
    pub fn in_memory() -> Self {
        Self::new(
            Stores::in_memory(),
            Arc::new(SystemClock),
            Arc::new(RandomIds),
        )
    }

    pub fn register_player(&self, name: &str) -> Result<Player, RegisterPlayerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegisterPlayerError::EmptyName);
        }
        let _guard = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.player_by_name(name).is_some() {
            warn!("rejected registration: name {:?} already taken", name);
            return Err(RegisterPlayerError::NameTaken(name.to_string()));
        }
        let player = Player::new(self.ids.next_player_id(), name);
        self.stores.players.save(player.clone());
        info!("registered player {} ({})", player.name(), player.id());
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player, NotFound> {
        self.stores.players.get(&id).ok_or(NotFound::Player(id))
    }

    pub fn player_by_name(&self, name: &str) -> Option<Player> {
        self.stores
            .players
            .values()
            .into_iter()
            .find(|p| p.name() == name)
    }

    /// Create a battle between two registered players together with their
    /// two empty fleets. `created_at` defaults to the clock.
    pub fn create_battle(
        &self,
        player1: PlayerId,
        player2: PlayerId,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Battle, CreateBattleError> {
        for id in [player1, player2] {
            if !self.stores.players.contains(&id) {
                return Err(NotFound::Player(id).into());
            }
        }
        let created_at = created_at.unwrap_or_else(|| self.clock.now());
        let battle = Battle::new(self.ids.next_battle_id(), player1, player2, created_at)?;
        for index in PlayerIndex::BOTH {
            self.stores
                .fleets
                .save(Fleet::new(FleetId::new(battle.id(), index)));
        }
        self.stores.battles.save(battle.clone());
        info!("created battle {} ({} vs {})", battle.id(), player1, player2);
        Ok(battle)
    }

    /// Like [`Engine::create_battle`], resolving players by name first.
    pub fn create_battle_by_names(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Battle, CreateBattleError> {
        let resolve = |name: &str| {
            self.player_by_name(name)
                .map(|p| p.id())
                .ok_or_else(|| CreateBattleError::UnknownPlayerName(name.to_string()))
        };
        let (p1, p2) = (resolve(player1)?, resolve(player2)?);
        self.create_battle(p1, p2, None)
    }

    pub fn battle(&self, id: BattleId) -> Result<Battle, NotFound> {
        self.stores.battles.get(&id).ok_or(NotFound::Battle(id))
    }

    pub fn battles(&self) -> Vec<Battle> {
        self.stores.battles.values()
    }

    pub fn fleet(&self, id: FleetId) -> Result<Fleet, NotFound> {
        self.stores.fleets.get(&id).ok_or(NotFound::Fleet(id))
    }

    pub fn ship(&self, id: ShipId) -> Result<Ship, NotFound> {
        self.stores.ships.get(&id).ok_or(NotFound::Ship(id))
    }

    /// Ships deployed in a fleet, in catalog order.
    pub fn fleet_ships(&self, id: FleetId) -> Result<Vec<Ship>, NotFound> {
        if !self.stores.fleets.contains(&id) {
            return Err(NotFound::Fleet(id));
        }
        Ok(self.ships_of(id))
    }

    /// `true` once the fleet holds one ship of every type.
    pub fn is_fleet_complete(&self, id: FleetId) -> Result<bool, NotFound> {
        Ok(self.fleet_ships(id)?.len() == NUM_SHIPS)
    }

    pub(crate) fn ships_of(&self, fleet: FleetId) -> Vec<Ship> {
        let key = |ship_type| ShipId::new(fleet.battle(), fleet.player(), ship_type);
        let first = key(ShipType::ALL[0]);
        let last = key(ShipType::ALL[NUM_SHIPS - 1]);
        self.stores.ships.values_in(first..=last)
    }
}
