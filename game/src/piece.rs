use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SHAPE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Board cell id for settled cells of this kind (0 is empty).
    pub const fn cell_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    pub fn from_cell_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.cell_id() == id)
    }

    pub const fn glyph(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    pub const fn shape(self) -> ShapeMask {
        base_shape(self)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece kind {0:?} (expected one of I, O, T, S, Z, J, L)")]
pub struct ParsePieceKindError(String);

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(ParsePieceKindError(s.to_string()));
        };
        let c = c.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.glyph() == c)
            .ok_or_else(|| ParsePieceKindError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const ZERO: Vec2i = Vec2i { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` when either component overflows.
    pub fn checked_add(self, rhs: Vec2i) -> Option<Vec2i> {
        Some(Vec2i::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

/// 4x4 occupancy mask in local coordinates, `(row 0, col 0)` at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMask {
    cells: [u8; SHAPE_SIZE * SHAPE_SIZE],
}

impl ShapeMask {
    pub const fn from_cells(cells: [u8; SHAPE_SIZE * SHAPE_SIZE]) -> Self {
        Self { cells }
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < SHAPE_SIZE && col < SHAPE_SIZE);
        self.cells[row * SHAPE_SIZE + col] != 0
    }

    /// Occupied `(row, col)` pairs, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(|(i, _)| (i / SHAPE_SIZE, i % SHAPE_SIZE))
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }
}

/// The falling shape and its board-relative anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    shape: ShapeMask,
    anchor: Vec2i,
}

impl Piece {
    pub fn new(kind: PieceKind, anchor: Vec2i) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            anchor,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &ShapeMask {
        &self.shape
    }

    pub fn anchor(&self) -> Vec2i {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Vec2i) {
        self.anchor = anchor;
    }

    /// Board `(row, col)` of every occupied cell if the anchor were at `(x, y)`.
    ///
    /// Coordinates past `i32::MAX` saturate, so they still land outside any board.
    pub fn cells_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(r, c)| (y.saturating_add(r as i32), x.saturating_add(c as i32)))
    }

    /// Board `(row, col)` of every occupied cell at the current anchor.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_at(self.anchor.x, self.anchor.y)
    }
}

// Shapes are packed into the top-left corner so every kind fits at anchor (0, 0).
const fn base_shape(kind: PieceKind) -> ShapeMask {
    match kind {
        PieceKind::I => ShapeMask::from_cells([
            1, 1, 1, 1, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::O => ShapeMask::from_cells([
            1, 1, 0, 0, //
            1, 1, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::T => ShapeMask::from_cells([
            1, 1, 1, 0, //
            0, 1, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::S => ShapeMask::from_cells([
            0, 1, 1, 0, //
            1, 1, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::Z => ShapeMask::from_cells([
            1, 1, 0, 0, //
            0, 1, 1, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::J => ShapeMask::from_cells([
            1, 0, 0, 0, //
            1, 1, 1, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
        PieceKind::L => ShapeMask::from_cells([
            0, 0, 1, 0, //
            1, 1, 1, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ]),
    }
}
