#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first search from a ship's tile to the nearest goal tile.

use std::collections::VecDeque;

use dogfight_core::{Control, Direction, GridOracle, TileCoord};
use tracing::trace;

/// Result of a single search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Tiles from the start tile to the first goal reached, both inclusive.
    pub path: Option<Vec<TileCoord>>,
    /// Number of tiles whose neighbours were examined.
    pub expanded: usize,
}

impl SearchOutcome {
    /// Control that moves one step along the path, or no action when the
    /// search failed or the ship already stands on a goal.
    #[must_use]
    pub fn first_step(&self) -> Control {
        self.path.as_deref().map_or(Control::NO_ACTION, first_step)
    }
}

/// Breadth-first path search that reuses its frontier between calls.
///
/// Each frontier entry carries the complete path walked so far. Neighbours
/// are expanded in `+x, -x, +y, -y` order, which decides between paths of
/// equal length.
#[derive(Debug, Default)]
pub struct PathSearch {
    frontier: VecDeque<Vec<TileCoord>>,
}

impl PathSearch {
    /// Creates a search with an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches from `start` over safe tiles until a goal tile is popped.
    ///
    /// Tiles are flagged visited on the board as soon as they are discovered,
    /// so each tile enters the frontier at most once. The start tile is
    /// flagged too, whether or not it is safe.
    pub fn search<G>(&mut self, board: &mut G, start: TileCoord) -> SearchOutcome
    where
        G: GridOracle + ?Sized,
    {
        self.frontier.clear();
        board.set_visited(start);
        self.frontier.push_back(vec![start]);

        let mut expanded = 0;
        while let Some(path) = self.frontier.pop_front() {
            let Some(&last) = path.last() else {
                continue;
            };

            if board.is_goal(last) {
                self.frontier.clear();
                trace!(
                    column = start.column(),
                    row = start.row(),
                    length = path.len(),
                    expanded,
                    "goal reached"
                );
                return SearchOutcome {
                    path: Some(path),
                    expanded,
                };
            }

            expanded += 1;
            for direction in Direction::SEARCH_ORDER {
                let next = last.step(direction);
                if !board.is_safe_at(next) || board.is_visited(next) {
                    continue;
                }
                board.set_visited(next);

                let mut extended = Vec::with_capacity(path.len() + 1);
                extended.extend_from_slice(&path);
                extended.push(next);
                self.frontier.push_back(extended);
            }
        }

        trace!(
            column = start.column(),
            row = start.row(),
            expanded,
            "no goal reachable"
        );
        SearchOutcome {
            path: None,
            expanded,
        }
    }
}

/// Control that moves from the first tile of `path` toward its second tile.
///
/// Paths with fewer than two tiles produce no movement.
#[must_use]
pub fn first_step(path: &[TileCoord]) -> Control {
    match path {
        [from, to, ..] => step_between(*from, *to),
        _ => Control::NO_ACTION,
    }
}

/// Single-step control implied by the delta between two tiles.
///
/// Column changes are checked before row changes.
#[must_use]
pub fn step_between(from: TileCoord, to: TileCoord) -> Control {
    if to.column() < from.column() {
        Control::MOVE_LEFT
    } else if to.column() > from.column() {
        Control::MOVE_RIGHT
    } else if to.row() < from.row() {
        Control::MOVE_UP
    } else if to.row() > from.row() {
        Control::MOVE_DOWN
    } else {
        Control::NO_ACTION
    }
}
