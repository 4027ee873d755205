use engine::graphics::{Color, Rect, Renderer2d};
use engine::surface::SurfaceSize;

use crate::board::{Board, CELL_EMPTY};
use crate::controller::Playfield;
use crate::piece::Piece;

pub const DEFAULT_CELL_SIZE: u32 = 30;

pub const COLOR_GRID_LINE: Color = [40, 40, 52, 255];
const COLOR_UNKNOWN: Color = [255, 255, 255, 255];

/// One colour per tetromino, indexed by `cell_id - 1`.
pub const PIECE_COLORS: [Color; 7] = [
    [0, 229, 255, 255],  // I
    [255, 215, 0, 255],  // O
    [186, 85, 211, 255], // T
    [0, 200, 0, 255],    // S
    [220, 20, 60, 255],  // Z
    [30, 144, 255, 255], // J
    [255, 140, 0, 255],  // L
];

pub fn color_for_cell(id: u8) -> Color {
    match id {
        CELL_EMPTY => COLOR_GRID_LINE,
        id => PIECE_COLORS
            .get(usize::from(id) - 1)
            .copied()
            .unwrap_or(COLOR_UNKNOWN),
    }
}

/// Maps grid coordinates to pixels. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub origin_x: u32,
    pub origin_y: u32,
    pub cell_size: u32,
}

impl BoardLayout {
    pub fn new(origin_x: u32, origin_y: u32, cell_size: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size,
        }
    }

    /// Horizontally centered, top-aligned. Boards wider than the surface start at x = 0.
    pub fn centered(surface: SurfaceSize, board: &Board, cell_size: u32) -> Self {
        let board_px = (board.width() as u32).saturating_mul(cell_size);
        Self::new(surface.width.saturating_sub(board_px) / 2, 0, cell_size)
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin_x + col as u32 * self.cell_size,
            self.origin_y + row as u32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    pub fn board_rect(&self, board: &Board) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            board.width() as u32 * self.cell_size,
            board.height() as u32 * self.cell_size,
        )
    }
}

/// Outlines empty cells and fills settled ones.
pub fn draw_board(gfx: &mut dyn Renderer2d, board: &Board, layout: &BoardLayout) {
    for (row, cells) in board.rows().iter().enumerate() {
        for (col, &id) in cells.iter().enumerate() {
            let rect = layout.cell_rect(row, col);
            if id == CELL_EMPTY {
                gfx.rect_outline(rect, COLOR_GRID_LINE);
            } else {
                gfx.fill_rect(rect, color_for_cell(id));
            }
        }
    }
}

pub fn draw_piece(gfx: &mut dyn Renderer2d, piece: &Piece, board: &Board, layout: &BoardLayout) {
    let color = color_for_cell(piece.kind().cell_id());
    for (row, col) in piece.cells() {
        if board.in_bounds(row, col) {
            gfx.fill_rect(layout.cell_rect(row as usize, col as usize), color);
        }
    }
}

pub fn draw_playfield(
    gfx: &mut dyn Renderer2d,
    playfield: &Playfield,
    layout: &BoardLayout,
    background: Color,
) {
    gfx.clear(background);
    draw_board(gfx, playfield.board(), layout);
    draw_piece(gfx, playfield.piece(), playfield.board(), layout);
}
