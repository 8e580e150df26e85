//! Dense tile board that answers grid oracle queries for the planners.

use dogfight_core::{GridOracle, TileCoord, WorldPoint};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tile {
    safe: bool,
    power: bool,
    visited: bool,
    goal: bool,
}

/// Rectangular board of square tiles stored in row-major order.
#[derive(Clone, Debug)]
pub struct Board {
    columns: i32,
    rows: i32,
    tile_length: f32,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates a board on which every tile is safe and none is a power tile.
    ///
    /// Negative dimensions collapse to an empty board and non-positive tile
    /// lengths are replaced by a length of one world unit.
    #[must_use]
    pub fn open(columns: i32, rows: i32, tile_length: f32) -> Self {
        let columns = columns.max(0);
        let rows = rows.max(0);
        let count = usize::try_from(columns).unwrap_or(0) * usize::try_from(rows).unwrap_or(0);
        let tile_length = if tile_length > 0.0 { tile_length } else { 1.0 };

        Self {
            columns,
            rows,
            tile_length,
            tiles: vec![
                Tile {
                    safe: true,
                    ..Tile::default()
                };
                count
            ],
        }
    }

    /// Number of tile columns on the board.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of tile rows on the board.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Side length of a single tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Reports whether the tile lies on the board.
    #[must_use]
    pub fn contains(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some()
    }

    /// Marks the tile as traversable or as a hole. Off-board tiles are ignored.
    pub fn set_safe(&mut self, tile: TileCoord, safe: bool) {
        if let Some(entry) = self.tile_mut(tile) {
            entry.safe = safe;
        }
    }

    /// Toggles the power flag of the tile. Off-board tiles are ignored.
    pub fn set_power(&mut self, tile: TileCoord, power: bool) {
        if let Some(entry) = self.tile_mut(tile) {
            entry.power = power;
        }
    }

    /// World position of the tile's centre.
    #[must_use]
    pub fn tile_center(&self, tile: TileCoord) -> WorldPoint {
        WorldPoint::new(
            self.board_to_screen(tile.column()),
            self.board_to_screen(tile.row()),
        )
    }

    /// Tiles currently flagged as goals, in row-major order.
    #[must_use]
    pub fn goals(&self) -> Vec<TileCoord> {
        self.flagged(|tile| tile.goal)
    }

    /// Tiles currently flagged as visited, in row-major order.
    #[must_use]
    pub fn visited(&self) -> Vec<TileCoord> {
        self.flagged(|tile| tile.visited)
    }

    /// Number of safe tiles on the board.
    #[must_use]
    pub fn safe_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.safe).count()
    }

    fn flagged(&self, predicate: impl Fn(&Tile) -> bool) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| predicate(tile))
            .filter_map(|(index, _)| self.coord(index))
            .collect()
    }

    fn coord(&self, index: usize) -> Option<TileCoord> {
        let width = usize::try_from(self.columns).ok().filter(|width| *width > 0)?;
        let column = i32::try_from(index % width).ok()?;
        let row = i32::try_from(index / width).ok()?;
        Some(TileCoord::new(column, row))
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if tile.column() < 0 || tile.row() < 0 {
            return None;
        }
        if tile.column() >= self.columns || tile.row() >= self.rows {
            return None;
        }
        let column = usize::try_from(tile.column()).ok()?;
        let row = usize::try_from(tile.row()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    fn tile(&self, tile: TileCoord) -> Option<&Tile> {
        self.index(tile).and_then(|index| self.tiles.get(index))
    }

    fn tile_mut(&mut self, tile: TileCoord) -> Option<&mut Tile> {
        self.index(tile).and_then(|index| self.tiles.get_mut(index))
    }
}

impl GridOracle for Board {
    fn screen_to_board(&self, value: f32) -> i32 {
        (value / self.tile_length).floor() as i32
    }

    fn board_to_screen(&self, tile: i32) -> f32 {
        (tile as f32 + 0.5) * self.tile_length
    }

    fn dimensions(&self) -> (i32, i32) {
        (self.columns, self.rows)
    }

    fn is_safe_at(&self, tile: TileCoord) -> bool {
        self.tile(tile).is_some_and(|entry| entry.safe)
    }

    fn is_power_tile_at(&self, tile: TileCoord) -> bool {
        self.tile(tile).is_some_and(|entry| entry.power)
    }

    fn set_visited(&mut self, tile: TileCoord) {
        if let Some(entry) = self.tile_mut(tile) {
            entry.visited = true;
        }
    }

    fn is_visited(&self, tile: TileCoord) -> bool {
        self.tile(tile).is_some_and(|entry| entry.visited)
    }

    fn set_goal(&mut self, tile: TileCoord) {
        if let Some(entry) = self.tile_mut(tile) {
            entry.goal = true;
        }
    }

    fn clear_goal(&mut self, tile: TileCoord) {
        if let Some(entry) = self.tile_mut(tile) {
            entry.goal = false;
        }
    }

    fn is_goal(&self, tile: TileCoord) -> bool {
        self.tile(tile).is_some_and(|entry| entry.goal)
    }

    fn clear_marks(&mut self) {
        for tile in &mut self.tiles {
            tile.visited = false;
            tile.goal = false;
        }
    }
}
