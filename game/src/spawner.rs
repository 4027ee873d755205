use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceKind, Vec2i};

/// How the next piece kind is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnMode {
    /// Always the same kind.
    Fixed(PieceKind),
    /// Uniformly from the seven tetrominoes.
    #[default]
    Uniform,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    mode: SpawnMode,
    rng: StdRng,
    spawned: u64,
}

impl Spawner {
    pub fn new(mode: SpawnMode, seed: u64) -> Self {
        Self {
            mode,
            rng: StdRng::seed_from_u64(seed),
            spawned: 0,
        }
    }

    pub fn fixed(kind: PieceKind) -> Self {
        Self::new(SpawnMode::Fixed(kind), 0)
    }

    pub fn mode(&self) -> SpawnMode {
        self.mode
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn next_kind(&mut self) -> PieceKind {
        match self.mode {
            SpawnMode::Fixed(kind) => kind,
            SpawnMode::Uniform => PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())],
        }
    }

    /// A fresh piece anchored at the board origin.
    pub fn spawn(&mut self) -> Piece {
        let kind = self.next_kind();
        self.spawned = self.spawned.saturating_add(1);
        Piece::new(kind, Vec2i::ZERO)
    }
}
