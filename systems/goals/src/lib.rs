#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Goal marking heuristics that flag the tiles a ship wants to reach.
//!
//! Every behaviour state contributes its own set of candidate tiles; only
//! safe candidates are flagged. When nothing qualifies the ship's own tile is
//! flagged instead so the path search always has somewhere to stop.

use dogfight_core::{
    BehaviorState, ConfigError, ControllerConfig, Direction, GridOracle, RandomSource, TileCoord,
};
use tracing::debug;

const ADJACENT: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Inputs describing the ship's situation for one marking pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalRequest {
    /// Behaviour state selected for this decision cycle.
    pub state: BehaviorState,
    /// Tile occupied by the controlled ship.
    pub ship_tile: TileCoord,
    /// Tile of the active target, if there is one.
    pub target_tile: Option<TileCoord>,
    /// Controller tick at which the decision cycle runs.
    pub ticks: u64,
}

/// Summary of a marking pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalOutcome {
    /// Number of tiles flagged by the state heuristic.
    pub marked: usize,
    /// Indicates that no candidate qualified and the ship's own tile was flagged.
    pub fell_back: bool,
}

/// Per-ship goal marker that remembers the last wander destination.
#[derive(Debug)]
pub struct GoalMarker {
    attack_distance: i32,
    wander_interval: u64,
    last_wander: Option<TileCoord>,
}

impl GoalMarker {
    /// Creates a marker using the distances and cadence from the provided tuning.
    ///
    /// Fails when the tuning does not validate.
    pub fn new(config: &ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            attack_distance: config.attack_distance,
            wander_interval: config.wander_interval,
            last_wander: None,
        })
    }

    /// Destination most recently chosen while wandering, if any.
    #[must_use]
    pub const fn last_wander_destination(&self) -> Option<TileCoord> {
        self.last_wander
    }

    /// Flags the goal tiles for the request on the board.
    ///
    /// Existing marks are left alone; callers clear the board beforehand,
    /// typically by running inside a [`dogfight_core::PlanningPass`].
    pub fn mark<G>(
        &mut self,
        board: &mut G,
        request: GoalRequest,
        source: &mut dyn RandomSource,
    ) -> GoalOutcome
    where
        G: GridOracle + ?Sized,
    {
        let marked = match request.state {
            BehaviorState::Spawn => 0,
            BehaviorState::Wander => self.mark_wander(board, request, source),
            BehaviorState::Chase => request.target_tile.map_or(0, |target| {
                let reach = self.attack_distance - 1;
                let ring = [(reach, 0), (-reach, 0), (0, -reach), (0, reach)];
                mark_around(board, target, &ring, source)
            }),
            BehaviorState::Attack => request.target_tile.map_or(0, |target| {
                let near = self.attack_distance - 1;
                let far = self.attack_distance + 1;
                let ring = [(near, 0), (-far, 0), (0, -far), (0, near)];
                mark_around(board, target, &ring, source)
            }),
        };

        let fell_back = marked == 0;
        if fell_back {
            board.set_goal(request.ship_tile);
            debug!(
                state = ?request.state,
                column = request.ship_tile.column(),
                row = request.ship_tile.row(),
                "no goal candidate, holding position"
            );
        }

        GoalOutcome { marked, fell_back }
    }

    fn mark_wander<G>(
        &mut self,
        board: &mut G,
        request: GoalRequest,
        source: &mut dyn RandomSource,
    ) -> usize
    where
        G: GridOracle + ?Sized,
    {
        if request.ticks % self.wander_interval != 0 {
            let remembered = self.last_wander.unwrap_or_else(|| board.center());
            if board.is_safe_at(remembered) {
                board.set_goal(remembered);
                return 1;
            }
        }

        let direction = Direction::SEARCH_ORDER[source.next_index(Direction::SEARCH_ORDER.len())];
        let destination = request.ship_tile.step(direction);
        if !board.is_safe_at(destination) {
            return 0;
        }
        board.set_goal(destination);
        self.last_wander = Some(destination);
        1
    }
}

/// Flags either the ring offsets or the four adjacent tiles around `target`,
/// choosing between them with a coin flip. Returns how many were safe.
fn mark_around<G>(
    board: &mut G,
    target: TileCoord,
    ring: &[(i32, i32); 4],
    source: &mut dyn RandomSource,
) -> usize
where
    G: GridOracle + ?Sized,
{
    let offsets = if source.coin_flip() { ring } else { &ADJACENT };
    let mut marked = 0;
    for &(columns, rows) in offsets {
        let tile = target.offset(columns, rows);
        if board.is_safe_at(tile) {
            board.set_goal(tile);
            marked += 1;
        }
    }
    marked
}
