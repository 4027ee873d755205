use blockfall::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use blockfall::controller::{MoveOutcome, PiecePhase, Playfield, try_move};
use blockfall::piece::{Piece, PieceKind, Vec2i};
use blockfall::spawner::Spawner;

fn o_playfield(board: Board) -> Playfield {
    Playfield::new(board, Spawner::fixed(PieceKind::O))
}

fn drop_until_landed(playfield: &mut Playfield) -> usize {
    let mut moved = 0;
    loop {
        match playfield.advance_with_gravity() {
            MoveOutcome::Moved => moved += 1,
            MoveOutcome::Landed => return moved,
            MoveOutcome::Blocked => panic!("gravity was blocked after {moved} moves"),
        }
        assert!(moved <= BOARD_HEIGHT, "piece never landed");
    }
}

#[test]
fn o_piece_falls_to_the_floor_of_an_empty_board() {
    let mut playfield = o_playfield(Board::standard());

    for step in 1..=18 {
        assert_eq!(playfield.advance_with_gravity(), MoveOutcome::Moved, "step {step}");
        assert_eq!(playfield.piece().anchor(), Vec2i::new(0, step));
    }
    assert_eq!(playfield.advance_with_gravity(), MoveOutcome::Landed);

    let cells: Vec<_> = playfield
        .board()
        .occupied_cells()
        .map(|(row, col, _)| (row, col))
        .collect();
    assert_eq!(cells, vec![(18, 0), (18, 1), (19, 0), (19, 1)]);

    assert_eq!(playfield.piece().anchor(), Vec2i::ZERO);
    assert_eq!(playfield.phase(), PiecePhase::Spawned);
    assert_eq!(playfield.landed(), 1);
    assert!(!playfield.is_topped_out());
}

#[test]
fn o_piece_lands_on_a_settled_cell() {
    let mut rows = vec![vec![0u8; BOARD_WIDTH]; BOARD_HEIGHT];
    rows[5][0] = PieceKind::I.cell_id();
    let mut playfield = o_playfield(Board::from_rows(rows).expect("valid rows"));

    assert_eq!(drop_until_landed(&mut playfield), 3);

    let board = playfield.board();
    for (row, col) in [(3, 0), (3, 1), (4, 0), (4, 1)] {
        assert_eq!(board.cell(row, col), PieceKind::O.cell_id());
    }
    assert_eq!(board.cell(5, 0), PieceKind::I.cell_id());
    assert_eq!(board.occupied_count(), 5);
}

#[test]
fn landed_piece_is_absorbed_before_replacement() {
    let mut playfield = o_playfield(Board::standard());
    drop_until_landed(&mut playfield);

    let snapshot = playfield.snapshot();
    assert_eq!(snapshot.board.occupied_count(), 4);
    assert_eq!(snapshot.piece, Piece::new(PieceKind::O, Vec2i::ZERO));
    assert_eq!(snapshot.landed, 1);
    assert_eq!(playfield.spawner().spawned(), 2);
}

#[test]
fn stacked_pieces_land_on_each_other() {
    let mut playfield = o_playfield(Board::standard());
    assert_eq!(drop_until_landed(&mut playfield), 18);
    assert_eq!(drop_until_landed(&mut playfield), 16);
    assert!(playfield.board().is_occupied(16, 0));
    assert!(playfield.board().is_occupied(17, 1));
    assert_eq!(playfield.landed(), 2);
}

#[test]
fn walls_block_horizontal_moves_without_changing_anything() {
    let mut playfield = o_playfield(Board::standard());
    let before = playfield.snapshot();

    assert_eq!(playfield.shift(-1), MoveOutcome::Blocked);
    assert_eq!(playfield.snapshot(), before);

    for _ in 0..8 {
        assert_eq!(playfield.shift(1), MoveOutcome::Moved);
    }
    assert_eq!(playfield.piece().anchor(), Vec2i::new(8, 0));
    assert_eq!(playfield.shift(1), MoveOutcome::Blocked);
    assert_eq!(playfield.piece().anchor(), Vec2i::new(8, 0));
    assert_eq!(playfield.board().occupied_count(), 0);
}

#[test]
fn settled_cells_block_sideways_moves() {
    let mut rows = vec![vec![0u8; BOARD_WIDTH]; BOARD_HEIGHT];
    rows[0][2] = PieceKind::Z.cell_id();
    let mut playfield = o_playfield(Board::from_rows(rows).expect("valid rows"));

    assert_eq!(playfield.shift(1), MoveOutcome::Blocked);
    assert_eq!(playfield.piece().anchor(), Vec2i::ZERO);
}

#[test]
fn phase_moves_from_spawned_to_falling() {
    let mut playfield = o_playfield(Board::standard());
    assert_eq!(playfield.phase(), PiecePhase::Spawned);
    playfield.shift(1);
    assert_eq!(playfield.phase(), PiecePhase::Falling);
}

#[test]
fn replacement_colliding_at_origin_tops_out() {
    // A two-row board fits exactly one O piece.
    let mut playfield = o_playfield(Board::new(BOARD_WIDTH, 2));
    assert!(!playfield.is_topped_out());

    assert_eq!(playfield.soft_drop(), MoveOutcome::Landed);
    assert!(playfield.is_topped_out());
    assert_eq!(playfield.landed(), 1);

    let frozen = playfield.snapshot();
    assert_eq!(playfield.advance_with_gravity(), MoveOutcome::Blocked);
    assert_eq!(playfield.shift(1), MoveOutcome::Blocked);
    assert_eq!(playfield.snapshot(), frozen);
}

#[test]
fn first_piece_colliding_at_origin_starts_topped_out() {
    let board = Board::from_rows(vec![vec![1, 0, 0, 0], vec![0, 0, 0, 0]]).expect("valid rows");
    let playfield = o_playfield(board);
    assert!(playfield.is_topped_out());
}

#[test]
fn try_move_reports_landing_without_moving() {
    let board = Board::standard();
    let mut piece = Piece::new(PieceKind::I, Vec2i::new(0, 19));
    assert_eq!(try_move(&mut piece, 0, 1, &board), MoveOutcome::Landed);
    assert_eq!(piece.anchor(), Vec2i::new(0, 19));
}

#[test]
fn overflowing_deltas_collide_instead_of_wrapping() {
    let board = Board::standard();

    let mut piece = Piece::new(PieceKind::O, Vec2i::new(1, 0));
    assert_eq!(try_move(&mut piece, i32::MAX, 0, &board), MoveOutcome::Blocked);
    assert_eq!(try_move(&mut piece, i32::MIN, 0, &board), MoveOutcome::Blocked);
    assert_eq!(piece.anchor(), Vec2i::new(1, 0));

    let mut piece = Piece::new(PieceKind::O, Vec2i::new(0, 1));
    assert_eq!(try_move(&mut piece, 0, i32::MAX, &board), MoveOutcome::Landed);
    assert_eq!(piece.anchor(), Vec2i::new(0, 1));
}

#[test]
fn collides_at_extreme_anchors() {
    let board = Board::standard();
    let piece = Piece::new(PieceKind::T, Vec2i::ZERO);
    for (x, y) in [(i32::MAX, 0), (0, i32::MAX), (i32::MIN, 0), (i32::MAX, i32::MAX)] {
        assert!(board.collides(&piece, x, y), "anchor ({x}, {y})");
    }
}
