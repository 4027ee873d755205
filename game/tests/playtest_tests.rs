use engine::HeadlessRunner;

use blockfall::controller::PiecePhase;
use blockfall::piece::{PieceKind, Vec2i};
use blockfall::playtest::{BlockfallLogic, InputAction, run_headless};
use blockfall::spawner::SpawnMode;

fn fixed_o() -> BlockfallLogic {
    BlockfallLogic::new(0, SpawnMode::Fixed(PieceKind::O))
}

#[test]
fn inputs_drive_the_piece_without_gravity() {
    let mut runner = HeadlessRunner::new(fixed_o());
    runner.run([
        InputAction::MoveRight,
        InputAction::MoveRight,
        InputAction::Noop,
        InputAction::SoftDrop,
        InputAction::MoveLeft,
    ]);

    assert_eq!(runner.frame(), 5);
    assert_eq!(runner.state().piece().anchor(), Vec2i::new(1, 1));
    assert_eq!(runner.state().phase(), PiecePhase::Falling);
}

#[test]
fn noop_without_gravity_changes_nothing() {
    let mut runner = HeadlessRunner::new(fixed_o());
    let before = runner.state().snapshot();
    runner.run(std::iter::repeat(InputAction::Noop).take(50));
    assert_eq!(runner.state().snapshot(), before);
}

#[test]
fn gravity_step_follows_the_input() {
    let mut runner = HeadlessRunner::new(fixed_o().with_gravity(true));
    runner.step(InputAction::MoveRight);
    assert_eq!(runner.state().piece().anchor(), Vec2i::new(1, 1));
}

#[test]
fn headless_run_stacks_until_top_out() {
    let playfield = run_headless(fixed_o(), 1_000);

    // Ten O pieces fill the two left columns from floor to ceiling.
    assert!(playfield.is_topped_out());
    assert_eq!(playfield.landed(), 10);
    assert_eq!(playfield.board().occupied_count(), 40);
    for row in 0..20 {
        assert!(playfield.board().is_occupied(row, 0));
        assert!(playfield.board().is_occupied(row, 1));
        assert!(!playfield.board().is_occupied(row, 2));
    }
}

#[test]
fn headless_run_honours_step_count() {
    let playfield = run_headless(fixed_o(), 19);
    assert_eq!(playfield.landed(), 1);
    assert_eq!(playfield.piece().anchor(), Vec2i::ZERO);
}

#[test]
fn same_seed_gives_same_game() {
    let logic = BlockfallLogic::new(42, SpawnMode::Uniform).with_board_size(6, 12);
    let a = run_headless(logic.clone(), 300);
    let b = run_headless(logic, 300);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.board().width(), 6);
    assert_eq!(a.board().height(), 12);
}
