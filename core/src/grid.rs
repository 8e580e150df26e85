//! Grid oracle contract and scoped planning passes.

use std::ops::{Deref, DerefMut};

use crate::{TileCoord, WorldPoint};

/// Tile board queried and annotated by the planners.
///
/// Implementations answer safety and power-tile queries and store two kinds
/// of scratch marks: *visited* flags written by the path search and *goal*
/// flags written by the goal marker. Queries for tiles outside the board must
/// report `false`, and marks on such tiles must be ignored.
pub trait GridOracle {
    /// Converts a world coordinate into a tile index along the same axis.
    fn screen_to_board(&self, value: f32) -> i32;

    /// Converts a tile index into the world coordinate of the tile centre.
    fn board_to_screen(&self, tile: i32) -> f32;

    /// Number of columns and rows on the board.
    fn dimensions(&self) -> (i32, i32);

    /// Reports whether a ship may occupy or traverse the tile.
    fn is_safe_at(&self, tile: TileCoord) -> bool;

    /// Reports whether the tile grants two-dimensional attack range.
    fn is_power_tile_at(&self, tile: TileCoord) -> bool;

    /// Flags the tile as visited by the current search.
    fn set_visited(&mut self, tile: TileCoord);

    /// Reports whether the current search already reached the tile.
    fn is_visited(&self, tile: TileCoord) -> bool;

    /// Flags the tile as a desirable destination.
    fn set_goal(&mut self, tile: TileCoord);

    /// Removes the goal flag from the tile.
    fn clear_goal(&mut self, tile: TileCoord);

    /// Reports whether the tile is flagged as a destination.
    fn is_goal(&self, tile: TileCoord) -> bool;

    /// Removes every visited and goal flag from the board.
    fn clear_marks(&mut self);

    /// Tile containing the provided world position.
    fn tile_at(&self, point: WorldPoint) -> TileCoord {
        TileCoord::new(self.screen_to_board(point.x()), self.screen_to_board(point.y()))
    }

    /// Tile at the middle of the board.
    fn center(&self) -> TileCoord {
        let (columns, rows) = self.dimensions();
        TileCoord::new(columns / 2, rows / 2)
    }
}

/// Exclusive borrow of a grid for the duration of one planning pass.
///
/// Marks left behind by earlier passes are cleared when the pass begins and
/// the pass's own marks are cleared again when it is dropped, so consecutive
/// planners sharing one board never observe each other's scratch state.
#[derive(Debug)]
pub struct PlanningPass<'a, G: GridOracle + ?Sized> {
    grid: &'a mut G,
}

impl<'a, G: GridOracle + ?Sized> PlanningPass<'a, G> {
    /// Starts a planning pass over the provided grid.
    #[must_use]
    pub fn begin(grid: &'a mut G) -> Self {
        grid.clear_marks();
        Self { grid }
    }
}

impl<G: GridOracle + ?Sized> Deref for PlanningPass<'_, G> {
    type Target = G;

    fn deref(&self) -> &Self::Target {
        self.grid
    }
}

impl<G: GridOracle + ?Sized> DerefMut for PlanningPass<'_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.grid
    }
}

impl<G: GridOracle + ?Sized> Drop for PlanningPass<'_, G> {
    fn drop(&mut self) {
        self.grid.clear_marks();
    }
}
