use std::path::PathBuf;

use anyhow::{Context, Result};
use blockfall::headful::BlockfallApp;
use blockfall::piece::PieceKind;
use blockfall::playtest::{BlockfallLogic, run_headless};
use blockfall::settings::{SettingsOverrides, resolve_settings};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle prototype")]
struct Cli {
    /// Settings file (defaults to $BLOCKFALL_SETTINGS_PATH or the XDG config dir).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Seed for piece selection.
    #[arg(long)]
    seed: Option<u64>,
    /// Always spawn this piece kind (I, O, T, S, Z, J or L).
    #[arg(long)]
    piece: Option<PieceKind>,
    /// Run this many gravity steps without a window and print the board.
    #[arg(long, value_name = "STEPS")]
    headless: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let overrides = SettingsOverrides {
        seed: cli.seed,
        piece: cli.piece,
    };
    let settings = resolve_settings(cli.settings.as_deref(), overrides)
        .context("failed to load settings")?;
    let seed = settings.spawn.seed.unwrap_or_else(rand::random);

    if let Some(steps) = cli.headless {
        let logic = BlockfallLogic::new(seed, settings.spawn.mode)
            .with_board_size(settings.board.width, settings.board.height);
        let playfield = run_headless(logic, steps);
        print!("{}", playfield.board());
        println!(
            "landed {} pieces{}",
            playfield.landed(),
            if playfield.is_topped_out() {
                ", topped out"
            } else {
                ""
            }
        );
        return Ok(());
    }

    let app = BlockfallApp::new(settings, seed);
    let config = app.app_config();
    engine::app::run_game(config, app).context("failed to start the display")?;
    Ok(())
}
