use arrayvec::ArrayVec;

use crate::game_state::Tetromino;
use crate::types::{Lifecycle, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_PREVIEW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameSnapshot {
    /// Locked cells as grid codes (0 empty, 1-7 piece kinds), hidden rows included
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece's pivot; `None` when ghosts are off
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: ArrayVec<PieceKind, MAX_PREVIEW>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub lifecycle: Lifecycle,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next_queue: ArrayVec::new(),
            score: 0,
            lines: 0,
            level: 1,
            combo: -1,
            back_to_back: false,
            lifecycle: Lifecycle::Spawning,
        }
    }
}
