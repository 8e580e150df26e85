//! ASCII board layouts.
//!
//! Each non-blank line describes one row of tiles:
//!
//! * `.` a safe tile,
//! * `+` a safe power tile,
//! * `#` a hole that ships cannot enter.
//!
//! Leading and trailing whitespace on a line is ignored.

use dogfight_core::{GridOracle, TileCoord};
use thiserror::Error;

use crate::Board;

const SAFE_GLYPH: char = '.';
const POWER_GLYPH: char = '+';
const HOLE_GLYPH: char = '#';

/// Reasons a layout cannot be turned into a board.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The layout contained no rows.
    #[error("layout does not contain any rows")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character outside the layout alphabet was found.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Character that was not recognised.
        glyph: char,
        /// Zero-based column of the character.
        column: usize,
        /// Zero-based row of the character.
        row: usize,
    },
    /// The layout is too large to index.
    #[error("layout exceeds the supported board size")]
    TooLarge,
    /// The tile length was not a positive finite number.
    #[error("tile length must be positive, got {0}")]
    InvalidTileLength(f32),
}

impl Board {
    /// Parses an ASCII layout into a board with the provided tile length.
    pub fn from_layout(layout: &str, tile_length: f32) -> Result<Self, LayoutError> {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(LayoutError::InvalidTileLength(tile_length));
        }

        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let expected = first.chars().count();

        let columns = i32::try_from(expected).map_err(|_| LayoutError::TooLarge)?;
        let row_count = i32::try_from(rows.len()).map_err(|_| LayoutError::TooLarge)?;
        let mut board = Board::open(columns, row_count, tile_length);

        for (row_index, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LayoutError::Ragged {
                    row: row_index,
                    expected,
                    found,
                });
            }

            for (column_index, glyph) in line.chars().enumerate() {
                let tile = TileCoord::new(
                    i32::try_from(column_index).map_err(|_| LayoutError::TooLarge)?,
                    i32::try_from(row_index).map_err(|_| LayoutError::TooLarge)?,
                );
                match glyph {
                    SAFE_GLYPH => {}
                    POWER_GLYPH => board.set_power(tile, true),
                    HOLE_GLYPH => board.set_safe(tile, false),
                    other => {
                        return Err(LayoutError::UnknownGlyph {
                            glyph: other,
                            column: column_index,
                            row: row_index,
                        })
                    }
                }
            }
        }

        Ok(board)
    }

    /// Renders the board using the layout alphabet, overlaying the provided
    /// markers (for example ship glyphs) on their tiles.
    #[must_use]
    pub fn render(&self, markers: &[(TileCoord, char)]) -> String {
        let mut text = String::new();
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                let tile = TileCoord::new(column, row);
                let glyph = markers
                    .iter()
                    .rev()
                    .find(|(marked, _)| *marked == tile)
                    .map(|(_, glyph)| *glyph)
                    .unwrap_or_else(|| {
                        if !self.is_safe_at(tile) {
                            HOLE_GLYPH
                        } else if self.is_power_tile_at(tile) {
                            POWER_GLYPH
                        } else {
                            SAFE_GLYPH
                        }
                    });
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }
}
