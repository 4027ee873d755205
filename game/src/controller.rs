use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Piece, Vec2i};
use crate::spawner::Spawner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The anchor moved to the candidate position.
    Moved,
    /// A downward move collided; the piece must be absorbed and replaced.
    Landed,
    /// A horizontal or upward move collided; nothing changed.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiecePhase {
    Spawned,
    Falling,
}

/// Proposes moving `piece` by `(delta_x, delta_y)` and commits it only if the board allows.
///
/// Movement is all-or-nothing: a piece never slides partially into a wall or the stack.
/// On `Landed` the anchor is left at the last valid position for the caller to absorb.
pub fn try_move(piece: &mut Piece, delta_x: i32, delta_y: i32, board: &Board) -> MoveOutcome {
    // An anchor that overflows is off every board.
    if let Some(candidate) = piece.anchor().checked_add(Vec2i::new(delta_x, delta_y)) {
        if !board.collides(piece, candidate.x, candidate.y) {
            piece.set_anchor(candidate);
            return MoveOutcome::Moved;
        }
    }
    if delta_y > 0 {
        MoveOutcome::Landed
    } else {
        MoveOutcome::Blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayfieldSnapshot {
    pub board: Board,
    pub piece: Piece,
    pub phase: PiecePhase,
    pub landed: u64,
    pub topped_out: bool,
}

/// The board, the one live piece and where replacements come from.
#[derive(Debug, Clone)]
pub struct Playfield {
    board: Board,
    piece: Piece,
    phase: PiecePhase,
    spawner: Spawner,
    landed: u64,
    topped_out: bool,
}

impl Playfield {
    pub fn new(board: Board, mut spawner: Spawner) -> Self {
        let piece = spawner.spawn();
        let topped_out = board.collides(&piece, 0, 0);
        if topped_out {
            info!("first {} piece does not fit at the origin", piece.kind());
        }
        Self {
            board,
            piece,
            phase: PiecePhase::Spawned,
            spawner,
            landed: 0,
            topped_out,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Number of pieces absorbed into the board so far.
    pub fn landed(&self) -> u64 {
        self.landed
    }

    /// True once a replacement piece collided at the origin; no further moves happen.
    pub fn is_topped_out(&self) -> bool {
        self.topped_out
    }

    /// Applies one proposed displacement to the live piece.
    ///
    /// A landing absorbs the piece at its current anchor before the replacement is spawned.
    pub fn apply(&mut self, delta_x: i32, delta_y: i32) -> MoveOutcome {
        if self.topped_out {
            return MoveOutcome::Blocked;
        }

        let outcome = try_move(&mut self.piece, delta_x, delta_y, &self.board);
        match outcome {
            MoveOutcome::Moved => self.phase = PiecePhase::Falling,
            MoveOutcome::Blocked => {}
            MoveOutcome::Landed => self.land_and_respawn(),
        }
        outcome
    }

    pub fn shift(&mut self, delta_x: i32) -> MoveOutcome {
        self.apply(delta_x, 0)
    }

    pub fn soft_drop(&mut self) -> MoveOutcome {
        self.apply(0, 1)
    }

    pub fn advance_with_gravity(&mut self) -> MoveOutcome {
        self.apply(0, 1)
    }

    pub fn snapshot(&self) -> PlayfieldSnapshot {
        PlayfieldSnapshot {
            board: self.board.clone(),
            piece: self.piece,
            phase: self.phase,
            landed: self.landed,
            topped_out: self.topped_out,
        }
    }

    fn land_and_respawn(&mut self) {
        let anchor = self.piece.anchor();
        self.board.absorb(&self.piece);
        self.landed = self.landed.saturating_add(1);
        debug!(
            "{} piece landed at ({}, {}); {} landed so far",
            self.piece.kind(),
            anchor.x,
            anchor.y,
            self.landed
        );

        self.piece = self.spawner.spawn();
        self.phase = PiecePhase::Spawned;
        if self.board.collides(&self.piece, 0, 0) {
            self.topped_out = true;
            info!(
                "stack reached the spawn point after {} pieces; gravity stopped",
                self.landed
            );
        } else {
            debug!("spawned {} piece", self.piece.kind());
        }
    }
}
