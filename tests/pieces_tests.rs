//! Pieces module tests - shapes and SRS kicks against a real board

use srs_tetris::core::pieces::{get_shape, kick_offsets, try_rotate};
use srs_tetris::core::Board;
use srs_tetris::types::{PieceKind, Rotation};

// ============== Shape Tests ==============

#[test]
fn test_t_piece_shapes() {
    assert_eq!(
        get_shape(PieceKind::T, Rotation::North),
        [(0, -1), (-1, 0), (0, 0), (1, 0)]
    );
    assert_eq!(
        get_shape(PieceKind::T, Rotation::South),
        [(-1, 0), (0, 0), (1, 0), (0, 1)]
    );
}

#[test]
fn test_o_piece_shapes() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_i_piece_spawns_flat_on_pivot_row() {
    let north = get_shape(PieceKind::I, Rotation::North);
    assert!(north.iter().all(|&(_, dy)| dy == 0));
}

// ============== Kick Tests ==============

#[test]
fn test_jlstz_kick_order_for_north_to_east() {
    assert_eq!(
        kick_offsets(PieceKind::J, Rotation::North, true),
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]
    );
}

#[test]
fn test_i_kick_order_for_north_to_east() {
    assert_eq!(
        kick_offsets(PieceKind::I, Rotation::North, true),
        &[(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]
    );
}

#[test]
fn test_j_rotation_kicks_off_obstacle() {
    let mut board = Board::new();
    // J East at pivot (1, 5) needs (1, 6); block it
    board.set(1, 6, Some(PieceKind::O));

    let result = try_rotate(PieceKind::J, Rotation::North, 1, 5, true, |r, x, y| {
        board.is_placement_legal(PieceKind::J, r, x, y)
    })
    .expect("second kick fits");

    assert_eq!(result.rotation, Rotation::East);
    assert_eq!((result.x, result.y), (0, 5));
    assert_eq!(result.kick_index, 1);
}

#[test]
fn test_j_rotation_first_legal_kick_wins() {
    let mut board = Board::new();
    // Block the unkicked and first kicked targets so the third entry (-1, -1) lands
    board.set(1, 6, Some(PieceKind::O));
    board.set(0, 6, Some(PieceKind::O));

    let result = try_rotate(PieceKind::J, Rotation::North, 1, 5, true, |r, x, y| {
        board.is_placement_legal(PieceKind::J, r, x, y)
    })
    .unwrap();

    assert_eq!(result.kick_index, 2);
    assert_eq!((result.x, result.y), (0, 4));
}

#[test]
fn test_j_rotation_fails_when_boxed_in() {
    let mut board = Board::from_rows(&["##########"; 22]);
    // Carve out only the J North cells around pivot (1, 5)
    for (x, y) in [(0, 4), (0, 5), (1, 5), (2, 5)] {
        board.set(x, y, None);
    }

    let result = try_rotate(PieceKind::J, Rotation::North, 1, 5, true, |r, x, y| {
        board.is_placement_legal(PieceKind::J, r, x, y)
    });
    assert!(result.is_none());
}

#[test]
fn test_o_rotation_never_moves() {
    let board = Board::new();
    let result = try_rotate(PieceKind::O, Rotation::North, 4, 10, false, |r, x, y| {
        board.is_placement_legal(PieceKind::O, r, x, y)
    })
    .unwrap();
    assert_eq!((result.x, result.y), (4, 10));
    assert_eq!(result.rotation, Rotation::West);
}
