//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Implements the Super Rotation System (SRS) with wall kick tables.
//! Reference: https://tetris.wiki/SRS
//!
//! Offsets are relative to the piece pivot with y growing downward. J, L, S, T
//! and Z turn about the centre mino of their 3x3 box, I about the centre of its
//! 4x4 box. Kick offsets are the standard SRS values with y negated to match.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shape catalog indexed by `[PieceKind::index()][Rotation::index()]`
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
        [(1, -1), (1, 0), (1, 1), (1, 2)],
        [(-1, 1), (0, 1), (1, 1), (2, 1)],
        [(0, -1), (0, 0), (0, 1), (0, 2)],
    ],
    // J
    [
        [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (1, -1), (0, 0), (0, 1)],
        [(-1, 0), (0, 0), (1, 0), (1, 1)],
        [(0, -1), (0, 0), (-1, 1), (0, 1)],
    ],
    // L
    [
        [(1, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (0, 0), (0, 1), (1, 1)],
        [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        [(-1, -1), (0, -1), (0, 0), (0, 1)],
    ],
    // O (same for all rotations)
    [
        [(0, -1), (1, -1), (0, 0), (1, 0)],
        [(0, -1), (1, -1), (0, 0), (1, 0)],
        [(0, -1), (1, -1), (0, 0), (1, 0)],
        [(0, -1), (1, -1), (0, 0), (1, 0)],
    ],
    // S
    [
        [(0, -1), (1, -1), (-1, 0), (0, 0)],
        [(0, -1), (0, 0), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (-1, 1), (0, 1)],
        [(-1, -1), (-1, 0), (0, 0), (0, 1)],
    ],
    // T
    [
        [(0, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (1, 0), (0, 1)],
        [(0, -1), (-1, 0), (0, 0), (0, 1)],
    ],
    // Z
    [
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
        [(1, -1), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (0, 1), (1, 1)],
        [(0, -1), (-1, 0), (0, 0), (-1, 1)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
#[inline]
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// SRS wall kick data
/// Each entry is (dx, dy) offset to try when rotation fails
/// Order: 0=initial rotation, 1-4=wall kicks
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece kind
/// Returns table indexed by [from_rotation * 2 + to_rotation_index]
/// where to_rotation_index is 0 for CW, 1 for CCW
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece only ever tries the zero offset
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (different from JLSTZ)
///
/// Guideline SRS I offsets with y negated for the y-down board.
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Get the kick index for a rotation transition
fn get_kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// The kick offsets tried for one rotation, in order.
///
/// The O piece yields only the zero offset.
pub fn kick_offsets(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static [(i8, i8)] {
    let kicks = &get_kick_table(kind)[get_kick_index(from, clockwise)];
    match kind {
        PieceKind::O => &kicks[..1],
        _ => &kicks[..],
    }
}

/// A committed rotation: the new state plus which kick landed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Index into the kick list (0 = no kick needed)
    pub kick_index: usize,
}

/// Try to rotate a piece with wall kicks
///
/// `is_legal` answers whether the piece fits at `(rotation, x, y)`.
/// Returns the first legal landing, or `None` if every kick fails.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    is_legal: impl Fn(Rotation, i8, i8) -> bool,
) -> Option<RotationResult> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    kick_offsets(kind, rotation, clockwise)
        .iter()
        .enumerate()
        .find_map(|(kick_index, &(dx, dy))| {
            let (nx, ny) = (x + dx, y + dy);
            is_legal(new_rotation, nx, ny).then_some(RotationResult {
                rotation: new_rotation,
                x: nx,
                y: ny,
                kick_index,
            })
        })
}

/// Diagonal neighbours of the pivot, used by the T-spin corner check
pub const PIVOT_CORNERS: [MinoOffset; 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
