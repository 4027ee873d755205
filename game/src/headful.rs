use std::time::Duration;

use engine::app::{AppConfig, AppContext, GameApp};
use engine::graphics::Renderer2d;
use log::{debug, info};
use winit::dpi::PhysicalSize;
use winit::event::VirtualKeyCode;

use crate::background::BackgroundMode;
use crate::board::Board;
use crate::controller::{MoveOutcome, Playfield};
use crate::playtest::InputAction;
use crate::render::{BoardLayout, draw_playfield};
use crate::settings::GameSettings;
use crate::spawner::Spawner;
use crate::state::GameState;

pub fn input_for_key(key: VirtualKeyCode) -> Option<InputAction> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(InputAction::MoveLeft),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(InputAction::MoveRight),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(InputAction::SoftDrop),
        _ => None,
    }
}

/// Windowed front end: gravity from frame time, arrow keys for movement.
#[derive(Debug, Clone)]
pub struct BlockfallApp {
    settings: GameSettings,
    seed: u64,
    game_over_reported: bool,
}

impl BlockfallApp {
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            game_over_reported: false,
        }
    }

    pub fn game_over_reported(&self) -> bool {
        self.game_over_reported
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            title: self.settings.window.title.clone(),
            desired_size: PhysicalSize::new(self.settings.window.width, self.settings.window.height),
            clamp_to_monitor: true,
            vsync: self.settings.window.vsync,
            frame_budget: self.settings.timing.frame_budget(),
        }
    }

    pub fn new_state(&self) -> GameState {
        let board = Board::new(self.settings.board.width, self.settings.board.height);
        let spawner = Spawner::new(self.settings.spawn.mode, self.seed);
        GameState::with_gravity(
            Playfield::new(board, spawner),
            self.settings.timing.gravity_interval(),
        )
    }

    fn background(&self) -> BackgroundMode {
        self.settings.background
    }

    // Gravity and a soft drop can both top out; log whichever gets there first, once.
    fn check_game_over(&mut self, state: &GameState) {
        if self.game_over_reported || !state.playfield().is_topped_out() {
            return;
        }
        self.game_over_reported = true;
        info!("game over after {} pieces", state.playfield().landed());
    }
}

impl GameApp for BlockfallApp {
    type State = GameState;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        info!(
            "starting {}x{} board, spawn mode {:?}, seed {}",
            self.settings.board.width, self.settings.board.height, self.settings.spawn.mode, self.seed
        );
        self.game_over_reported = false;
        self.new_state()
    }

    fn handle_key(&mut self, state: &mut Self::State, key: VirtualKeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        if let Some(action) = input_for_key(key) {
            let outcome = state.handle_input(action);
            debug!("{action:?} -> {outcome:?}");
            self.check_game_over(state);
        }
    }

    fn update(&mut self, state: &mut Self::State, _now: Duration, dt: Duration) {
        if let Some(MoveOutcome::Landed) = state.tick(dt) {
            self.check_game_over(state);
        }
    }

    fn render(&mut self, state: &Self::State, now: Duration, renderer: &mut dyn Renderer2d) {
        let board = state.playfield().board();
        let layout = BoardLayout::centered(renderer.size(), board, self.settings.board.cell_size);
        draw_playfield(
            renderer,
            state.playfield(),
            &layout,
            self.background().color_at(now),
        );
    }
}
