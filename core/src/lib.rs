#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dogfight engine.
//!
//! This crate defines the vocabulary that connects the authoritative arena,
//! the pure decision systems, and the adapters. The arena executes
//! [`Command`] values through its `apply` entry point and reports [`Event`]
//! values back. Decision systems never own ships or tiles: they read a
//! [`FleetView`] snapshot, borrow a [`GridOracle`] for the duration of a
//! planning pass, and answer with a [`Control`] bit set.

mod config;
mod grid;
mod random;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, ControllerConfig};
pub use grid::{GridOracle, PlanningPass};
#[cfg(any(test, feature = "test_support"))]
pub use random::ScriptedSource;
pub use random::{RandomSource, SeededSource};

/// Canonical banner emitted when the arena boots.
pub const WELCOME_BANNER: &str = "Welcome to Dogfight.";

/// Location of a single board tile expressed as column and row indices.
///
/// Coordinates are signed so that offsets computed around a ship near the
/// border may fall outside the board; such tiles are simply never safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: i32,
    row: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the tile displaced by the provided column and row deltas.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column.saturating_add(columns),
            row: self.row.saturating_add(rows),
        }
    }

    /// Returns the neighbouring tile in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (columns, rows) = direction.delta();
        self.offset(columns, rows)
    }

    /// Reports whether `other` lies strictly inside the square box of the
    /// given half-width centred on this tile.
    ///
    /// Both axes are tested independently, so the region is a square rather
    /// than a circle. A half-width of `n` accepts offsets in `-(n-1)..=(n-1)`.
    #[must_use]
    pub fn within_box(self, other: TileCoord, half_width: i32) -> bool {
        let limit = i64::from(half_width);
        let columns = (i64::from(other.column) - i64::from(self.column)).abs();
        let rows = (i64::from(other.row) - i64::from(self.row)).abs();
        columns < limit && rows < limit
    }

    /// Computes the Manhattan distance between two tiles.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Cardinal movement directions available to ships.
///
/// Rows grow downward, so [`Direction::Up`] decreases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Neighbour expansion order used by breadth-first search: +x, -x, +y, -y.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Column and row delta produced by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

bitflags! {
    /// Bit-vector of inputs selected by a controller for a single tick.
    ///
    /// At most one movement bit is set by the AI controllers; [`Control::FIRE`]
    /// combines freely with any of them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Control: u8 {
        /// Move toward decreasing column indices.
        const MOVE_LEFT = 1 << 0;
        /// Move toward increasing column indices.
        const MOVE_RIGHT = 1 << 1;
        /// Move toward decreasing row indices.
        const MOVE_UP = 1 << 2;
        /// Move toward increasing row indices.
        const MOVE_DOWN = 1 << 3;
        /// Fire the ship's weapon.
        const FIRE = 1 << 4;
    }
}

impl Control {
    /// Control value that requests neither movement nor firing.
    pub const NO_ACTION: Self = Self::empty();

    /// Movement direction encoded in the control, if any.
    ///
    /// Horizontal bits take precedence over vertical ones when several are
    /// set by a hand-built value.
    #[must_use]
    pub fn movement(self) -> Option<Direction> {
        if self.contains(Self::MOVE_LEFT) {
            Some(Direction::Left)
        } else if self.contains(Self::MOVE_RIGHT) {
            Some(Direction::Right)
        } else if self.contains(Self::MOVE_UP) {
            Some(Direction::Up)
        } else if self.contains(Self::MOVE_DOWN) {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Reports whether the control requests a shot.
    #[must_use]
    pub fn fires(self) -> bool {
        self.contains(Self::FIRE)
    }
}

impl From<Direction> for Control {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::MOVE_LEFT,
            Direction::Right => Self::MOVE_RIGHT,
            Direction::Up => Self::MOVE_UP,
            Direction::Down => Self::MOVE_DOWN,
        }
    }
}

/// Unique identifier assigned to a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(u32);

impl ShipId {
    /// Creates a new ship identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Continuous position expressed in world (screen) units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component of the position.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Immutable representation of a single ship's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipSnapshot {
    /// Unique identifier assigned to the ship.
    pub id: ShipId,
    /// World position of the ship's centre.
    pub position: WorldPoint,
    /// Indicates whether the ship is still alive and participating.
    pub active: bool,
    /// Indicates whether the ship's weapon is ready to fire this tick.
    pub can_fire: bool,
}

/// Read-only roster of every ship in the arena, including the player.
#[derive(Clone, Debug)]
pub struct FleetView {
    snapshots: Vec<ShipSnapshot>,
    player: ShipId,
}

impl FleetView {
    /// Creates a new fleet view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which defines roster order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ShipSnapshot>, player: ShipId) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots, player }
    }

    /// Iterator over the captured ship snapshots in roster order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &ShipSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot captured for the provided ship.
    #[must_use]
    pub fn get(&self, id: ShipId) -> Option<&ShipSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Identifier of the human-controlled ship.
    #[must_use]
    pub const fn player_id(&self) -> ShipId {
        self.player
    }

    /// Snapshot of the human-controlled ship, if it is part of the roster.
    #[must_use]
    pub fn player(&self) -> Option<&ShipSnapshot> {
        self.get(self.player)
    }

    /// Reports whether the ship exists and is still active.
    ///
    /// Ships removed from the roster are treated as inactive.
    #[must_use]
    pub fn is_active(&self, id: ShipId) -> bool {
        self.get(id).is_some_and(|snapshot| snapshot.active)
    }

    /// Number of ships in the roster, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the roster holds no ships at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// States of the per-ship behaviour machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// The ship just spawned; left unconditionally on the first decision cycle.
    #[default]
    Spawn,
    /// The ship is patrolling without a target in range.
    Wander,
    /// The ship has a target in range but must get closer.
    Chase,
    /// The ship has a target and is in position to shoot it.
    Attack,
}

/// Interface through which the host game loop polls a ship's controller.
pub trait InputController<G: GridOracle + ?Sized> {
    /// Computes the controls applied to the ship for the current tick.
    fn action(&mut self, board: &mut G, fleet: &FleetView) -> Control;
}

/// Errors raised while constructing a controller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ControllerError {
    /// The controlled ship does not exist in the roster.
    #[error("ship {} is not part of the roster", ship.get())]
    UnknownShip {
        /// Identifier that failed to resolve.
        ship: ShipId,
    },
    /// The supplied tuning is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Commands that express all permissible arena mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by a single tick.
    Tick,
    /// Applies a controller's output to a ship.
    Steer {
        /// Ship receiving the controls.
        ship: ShipId,
        /// Controls selected for the ship this tick.
        control: Control,
    },
    /// Removes a ship from play immediately.
    DestroyShip {
        /// Ship to deactivate.
        ship: ShipId,
    },
}

/// Events broadcast by the arena after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one tick.
    TimeAdvanced {
        /// Tick counter after advancing.
        tick: u64,
    },
    /// Confirms that a ship moved.
    ShipMoved {
        /// Ship that moved.
        ship: ShipId,
        /// Direction of travel.
        direction: Direction,
        /// Tile occupied after the move.
        tile: TileCoord,
    },
    /// Confirms that a ship discharged its weapon.
    ShotFired {
        /// Ship that fired.
        ship: ShipId,
    },
    /// Reports that a shot struck a ship.
    ShipHit {
        /// Ship that was struck.
        ship: ShipId,
        /// Ship that fired the shot.
        by: ShipId,
        /// Health remaining after the hit.
        remaining_health: u32,
    },
    /// Reports that a ship left play.
    ShipDestroyed {
        /// Ship that was destroyed.
        ship: ShipId,
    },
}
