use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceKind};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const CELL_EMPTY: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({row}, {col}) has unknown id {id}")]
    UnknownCell { row: usize, col: usize, id: u8 },
}

/// Settled cells of the playfield, indexed `[row][col]` with row 0 at the top.
///
/// Extents are fixed at construction. Occupancy only grows, through `absorb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<u8>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board extents must be non-zero");
        Self {
            width,
            height,
            cells: vec![vec![CELL_EMPTY; width]; height],
        }
    }

    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Builds a board from explicit rows of cell ids (`0` empty, `1..=7` piece kinds).
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            for (col, &id) in cells.iter().enumerate() {
                if id != CELL_EMPTY && PieceKind::from_cell_id(id).is_none() {
                    return Err(BoardError::UnknownCell { row, col, id });
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Cell id at `(row, col)`.
    ///
    /// Panics when the coordinate is outside the board: callers outside the collision
    /// check must never ask about such cells.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside the {}x{} board",
            self.width,
            self.height
        );
        self.cells[row][col]
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) != CELL_EMPTY
    }

    /// True when `piece` anchored at `(candidate_x, candidate_y)` would leave the board
    /// or overlap a settled cell. Never mutates anything.
    pub fn collides(&self, piece: &Piece, candidate_x: i32, candidate_y: i32) -> bool {
        piece.cells_at(candidate_x, candidate_y).any(|(row, col)| {
            !self.in_bounds(row, col) || self.cells[row as usize][col as usize] != CELL_EMPTY
        })
    }

    /// Folds `piece` into the settled cells at its current anchor.
    ///
    /// The anchor must be a valid, non-colliding placement.
    pub fn absorb(&mut self, piece: &Piece) {
        let anchor = piece.anchor();
        assert!(
            !self.collides(piece, anchor.x, anchor.y),
            "cannot absorb {} piece at colliding anchor ({}, {})",
            piece.kind(),
            anchor.x,
            anchor.y
        );

        let id = piece.kind().cell_id();
        for (row, col) in piece.cells() {
            self.cells[row as usize][col as usize] = id;
        }
    }

    /// Occupied cells as `(row, col, id)`, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &id)| id != CELL_EMPTY)
                .map(move |(col, &id)| (row, col, id))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied_cells().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|&id| PieceKind::from_cell_id(id).map_or('.', PieceKind::glyph))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
