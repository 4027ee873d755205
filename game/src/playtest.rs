use engine::{GameLogic, HeadlessRunner};

use crate::board::Board;
use crate::controller::Playfield;
use crate::spawner::{SpawnMode, Spawner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Noop,
    MoveLeft,
    MoveRight,
    SoftDrop,
}

/// Deterministic playfield stepping for headless runs.
#[derive(Debug, Clone)]
pub struct BlockfallLogic {
    seed: u64,
    spawn_mode: SpawnMode,
    board_width: usize,
    board_height: usize,
    gravity_enabled: bool,
}

impl BlockfallLogic {
    pub fn new(seed: u64, spawn_mode: SpawnMode) -> Self {
        let board = Board::standard();
        Self {
            seed,
            spawn_mode,
            board_width: board.width(),
            board_height: board.height(),
            gravity_enabled: false,
        }
    }

    pub fn with_board_size(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// When enabled, every step also applies one gravity move after the input.
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity_enabled = enabled;
        self
    }
}

impl GameLogic for BlockfallLogic {
    type State = Playfield;
    type Input = InputAction;

    fn initial_state(&self) -> Self::State {
        Playfield::new(
            Board::new(self.board_width, self.board_height),
            Spawner::new(self.spawn_mode, self.seed),
        )
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();

        match input {
            InputAction::Noop => {}
            InputAction::MoveLeft => {
                next.shift(-1);
            }
            InputAction::MoveRight => {
                next.shift(1);
            }
            InputAction::SoftDrop => {
                next.soft_drop();
            }
        }

        if self.gravity_enabled {
            next.advance_with_gravity();
        }

        next
    }
}

/// Runs `steps` gravity steps without input and returns the final playfield.
pub fn run_headless(logic: BlockfallLogic, steps: usize) -> Playfield {
    let mut runner = HeadlessRunner::new(logic.with_gravity(true));
    for _ in 0..steps {
        if runner.state().is_topped_out() {
            break;
        }
        runner.step(InputAction::Noop);
    }
    runner.into_state()
}
