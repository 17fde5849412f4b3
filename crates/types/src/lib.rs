//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine and any presentation layer.
//! Everything here is plain data: no timing, no board logic.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21). Rows 0 and 1 are hidden spawn rows,
//!   rows 2-21 are the visible playfield.
//! - **Spawn position**: pivot at (4, 1) with rotation North
//!
//! # Clock
//!
//! Timestamps are milliseconds. Internally every timer counts clock units of
//! 1/60 ms so that one 60 Hz frame is exactly [`FRAME_UNITS`] units:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 60 | Gravity frame cadence |
//! | `CLOCK_UNITS_PER_MS` | 60 | Clock units in one millisecond |
//! | `FRAME_UNITS` | 1000 | Clock units in one frame |
//!
//! # Gravity by Level
//!
//! Frames per row, indexed by `level - 1` and floored at the last entry:
//!
//! | Level | Frames | Level | Frames |
//! |-------|--------|-------|--------|
//! | 1 | 48 | 11-12 | 5 |
//! | 2 | 43 | 13-14 | 4 |
//! | 3 | 38 | 15-16 | 3 |
//! | 5 | 28 | 17-18 | 2 |
//! | 10 | 6 | 19+ | 1 |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

pub mod config;

pub use config::EngineConfig;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (2 hidden + 20 visible rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows above the visible playfield
pub const HIDDEN_ROWS: u8 = 2;

/// Rows a presentation layer is expected to draw
pub const VISIBLE_ROWS: u8 = BOARD_HEIGHT - HIDDEN_ROWS;

/// Pivot position of a freshly spawned piece (x, y)
pub const SPAWN_POSITION: (i8, i8) = (4, 1);

/// Number of distinct piece kinds
pub const PIECE_KINDS: usize = 7;

/// Upper bound on the preview queue length
pub const MAX_PREVIEW: usize = 7;

/// Gravity cadence
pub const FRAMES_PER_SECOND: u64 = 60;

/// Clock units per millisecond
pub const CLOCK_UNITS_PER_MS: u64 = FRAMES_PER_SECOND;

/// Clock units per gravity frame (1000 ms worth of units / 60 frames)
pub const FRAME_UNITS: u64 = 1000;

/// Frames per row by level (index 0 = level 1).
pub const GRAVITY_FRAMES_PER_ROW: [u32; 20] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 4, 4, 3, 3, 2, 2, 1, 1,
];

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Standard line clear points at level 1, indexed by lines cleared.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// T-spin line clear points at level 1, indexed by lines cleared.
///
/// A T piece cannot clear four rows, so index 4 is never reached in play.
pub const TSPIN_SCORES: [u32; 5] = [0, 800, 1200, 1600, 0];

/// Combo scoring base value (multiplied by combo index and level)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Soft drop points per row (not level scaled)
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Hard drop points per row (multiplied by level)
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// The seven tetromino piece kinds
///
/// Numeric codes (used by the snapshot grid) follow the declaration order, 1-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind in canonical order
    pub const ALL: [PieceKind; PIECE_KINDS] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Position in [`PieceKind::ALL`] (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Non-zero grid code (1-7); 0 is reserved for empty cells
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.code(), 1);
    /// assert_eq!(PieceKind::Z.code(), 7);
    /// ```
    pub fn code(self) -> u8 {
        self as u8 + 1
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// SRS state number (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Build from an SRS state number; values wrap modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete intents accepted by the engine
///
/// Directional moves come as press/release pairs so the engine can run
/// delayed auto shift; everything else is a one-shot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    /// Start moving left (one immediate shift, then DAS/ARR)
    MoveLeftPressed,
    /// Stop moving left
    MoveLeftReleased,
    /// Start moving right (one immediate shift, then DAS/ARR)
    MoveRightPressed,
    /// Stop moving right
    MoveRightReleased,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop and lock the piece
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Reset,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeftPressed"), Some(GameAction::MoveLeftPressed));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleftpressed" => Some(GameAction::MoveLeftPressed),
            "moveleftreleased" => Some(GameAction::MoveLeftReleased),
            "moverightpressed" => Some(GameAction::MoveRightPressed),
            "moverightreleased" => Some(GameAction::MoveRightReleased),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeftPressed => "moveLeftPressed",
            GameAction::MoveLeftReleased => "moveLeftReleased",
            GameAction::MoveRightPressed => "moveRightPressed",
            GameAction::MoveRightReleased => "moveRightReleased",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}

/// Piece lifecycle as seen by observers
///
/// `Spawning` and `Cleared` are passed through inside a single engine call;
/// a snapshot normally shows `Falling`, `LockPending`, `Paused` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    Spawning,
    Falling,
    LockPending,
    Cleared,
    GameOver,
    Paused,
}

impl Lifecycle {
    /// Whether gravity, lock delay and auto-shift are allowed to run
    pub fn is_running(self) -> bool {
        matches!(self, Lifecycle::Falling | Lifecycle::LockPending)
    }
}

/// Outcome of a single lock, kept for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub t_spin: bool,
    /// Points from the clear itself: table points, B2B multiplier and combo bonus.
    pub line_clear_score: u32,
    /// Hard drop descent bonus awarded just before the lock (0 for a natural lock).
    pub drop_score: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub b2b_applied: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Grid code of a cell: 0 for empty, otherwise [`PieceKind::code`].
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::code)
}
