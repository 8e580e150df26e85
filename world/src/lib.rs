#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state for Dogfight.
//!
//! The arena owns the tile [`Board`] and every ship. Adapters mutate it only
//! through [`apply`], and observe it through the [`query`] module.

mod board;
mod layout;

use dogfight_core::{
    Command, Control, Direction, Event, GridOracle, ShipId, TileCoord, WorldPoint,
    WELCOME_BANNER,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use board::Board;
pub use layout::LayoutError;

/// Physical tuning of ships inside the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaSettings {
    /// Distance travelled per tick by a moving ship, in world units.
    pub ship_speed: f32,
    /// Ticks a weapon needs to recharge after firing.
    pub weapon_cooldown: u32,
    /// Hits a ship absorbs before it is destroyed.
    pub ship_health: u32,
    /// Shots reach ships on the same row or column closer than this many tiles.
    pub shot_range: i32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            ship_speed: 1.0,
            weapon_cooldown: 20,
            ship_health: 3,
            shot_range: 4,
        }
    }
}

/// Reasons an arena mutation outside the command surface fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// Ships may only spawn on safe tiles.
    #[error("cannot spawn a ship on unsafe tile ({}, {})", tile.column(), tile.row())]
    UnsafeSpawn {
        /// Tile that was requested.
        tile: TileCoord,
    },
    /// The referenced ship does not exist.
    #[error("ship {} does not exist", ship.get())]
    UnknownShip {
        /// Identifier that failed to resolve.
        ship: ShipId,
    },
}

#[derive(Clone, Debug)]
struct Ship {
    id: ShipId,
    position: WorldPoint,
    health: u32,
    cooldown: u32,
    active: bool,
}

impl Ship {
    fn can_fire(&self) -> bool {
        self.active && self.cooldown == 0
    }
}

/// Represents the arena's authoritative state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    settings: ArenaSettings,
    ships: Vec<Ship>,
    player: ShipId,
    tick: u64,
}

impl World {
    /// Creates an arena over the provided board with no ships.
    #[must_use]
    pub fn new(board: Board, settings: ArenaSettings) -> Self {
        Self {
            banner: WELCOME_BANNER,
            board,
            settings,
            ships: Vec::new(),
            player: ShipId::new(0),
            tick: 0,
        }
    }

    /// Spawns a ship at the centre of the provided tile.
    ///
    /// Identifiers are allocated sequentially from zero; the first ship is the
    /// player until [`World::designate_player`] says otherwise.
    pub fn spawn_ship(&mut self, tile: TileCoord) -> Result<ShipId, WorldError> {
        if !self.board.is_safe_at(tile) {
            return Err(WorldError::UnsafeSpawn { tile });
        }

        let next = u32::try_from(self.ships.len()).unwrap_or(u32::MAX);
        let id = ShipId::new(next);
        self.ships.push(Ship {
            id,
            position: self.board.tile_center(tile),
            health: self.settings.ship_health,
            cooldown: 0,
            active: true,
        });
        debug!(ship = id.get(), column = tile.column(), row = tile.row(), "ship spawned");
        Ok(id)
    }

    /// Designates the human-controlled ship.
    pub fn designate_player(&mut self, ship: ShipId) -> Result<(), WorldError> {
        if self.ship(ship).is_none() {
            return Err(WorldError::UnknownShip { ship });
        }
        self.player = ship;
        Ok(())
    }

    /// Mutable access to the board so planners can annotate it.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }

    fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|ship| ship.id == id)
    }

    fn steer(&mut self, id: ShipId, control: Control, out_events: &mut Vec<Event>) {
        let Some(ship) = self.ship(id) else {
            return;
        };
        if !ship.active {
            return;
        }

        if let Some(direction) = control.movement() {
            self.advance(id, direction, out_events);
        }

        if control.fires() {
            self.fire(id, out_events);
        }
    }

    fn advance(&mut self, id: ShipId, direction: Direction, out_events: &mut Vec<Event>) {
        let speed = self.settings.ship_speed;
        let Some(ship) = self.ship(id) else {
            return;
        };
        let (columns, rows) = direction.delta();
        let destination = WorldPoint::new(
            ship.position.x() + columns as f32 * speed,
            ship.position.y() + rows as f32 * speed,
        );
        let tile = self.board.tile_at(destination);
        if !self.board.is_safe_at(tile) {
            return;
        }

        if let Some(ship) = self.ship_mut(id) {
            ship.position = destination;
            out_events.push(Event::ShipMoved {
                ship: id,
                direction,
                tile,
            });
        }
    }

    fn fire(&mut self, id: ShipId, out_events: &mut Vec<Event>) {
        let cooldown = self.settings.weapon_cooldown;
        let range = self.settings.shot_range;
        let Some(shooter) = self.ship(id) else {
            return;
        };
        if !shooter.can_fire() {
            return;
        }
        let origin = self.board.tile_at(shooter.position);

        let victim = self
            .ships
            .iter()
            .filter(|ship| ship.active && ship.id != id)
            .filter_map(|ship| {
                let tile = self.board.tile_at(ship.position);
                let aligned = tile.row() == origin.row() || tile.column() == origin.column();
                let distance = origin.manhattan_distance(tile);
                let in_range = i64::from(distance) < i64::from(range);
                (aligned && in_range).then_some((distance, ship.id))
            })
            .min()
            .map(|(_, victim)| victim);

        if let Some(shooter) = self.ship_mut(id) {
            shooter.cooldown = cooldown;
        }
        out_events.push(Event::ShotFired { ship: id });

        let Some(victim_id) = victim else {
            return;
        };
        if let Some(victim) = self.ship_mut(victim_id) {
            victim.health = victim.health.saturating_sub(1);
            let remaining_health = victim.health;
            out_events.push(Event::ShipHit {
                ship: victim_id,
                by: id,
                remaining_health,
            });
            if remaining_health == 0 {
                victim.active = false;
                debug!(ship = victim_id.get(), by = id.get(), "ship destroyed");
                out_events.push(Event::ShipDestroyed { ship: victim_id });
            }
        }
    }
}

/// Applies the provided command to the arena, emitting any resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick = world.tick.saturating_add(1);
            for ship in &mut world.ships {
                ship.cooldown = ship.cooldown.saturating_sub(1);
            }
            out_events.push(Event::TimeAdvanced { tick: world.tick });
        }
        Command::Steer { ship, control } => world.steer(ship, control, out_events),
        Command::DestroyShip { ship } => {
            if let Some(target) = world.ship_mut(ship) {
                if target.active {
                    target.active = false;
                    out_events.push(Event::ShipDestroyed { ship });
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the arena state.
pub mod query {
    use dogfight_core::{FleetView, GridOracle, ShipId, ShipSnapshot, TileCoord};

    use super::{Board, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the arena's board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Captures the roster of every ship in the arena.
    #[must_use]
    pub fn fleet_view(world: &World) -> FleetView {
        let snapshots = world
            .ships
            .iter()
            .map(|ship| ShipSnapshot {
                id: ship.id,
                position: ship.position,
                active: ship.active,
                can_fire: ship.can_fire(),
            })
            .collect();
        FleetView::from_snapshots(snapshots, world.player)
    }

    /// Tile currently occupied by the ship.
    #[must_use]
    pub fn ship_tile(world: &World, ship: ShipId) -> Option<TileCoord> {
        world
            .ship(ship)
            .map(|ship| world.board.tile_at(ship.position))
    }

    /// Remaining health of the ship.
    #[must_use]
    pub fn ship_health(world: &World, ship: ShipId) -> Option<u32> {
        world.ship(ship).map(|ship| ship.health)
    }

    /// Identifiers of ships that are still active, in roster order.
    #[must_use]
    pub fn active_ships(world: &World) -> Vec<ShipId> {
        world
            .ships
            .iter()
            .filter(|ship| ship.active)
            .map(|ship| ship.id)
            .collect()
    }
}
