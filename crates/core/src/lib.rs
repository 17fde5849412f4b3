//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, input devices, or wall clocks, making it:
//!
//! - **Deterministic**: Same seed and the same timestamps produce identical games
//! - **Testable**: Time is injected, so every timing rule can be exercised exactly
//! - **Portable**: Can run behind any presentation layer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 board with placement checks and line clearing
//! - [`game_state`]: The engine: active piece, hold, queue, lifecycle, timers
//! - [`pieces`]: Tetromino shape definitions and SRS rotation with wall kicks
//! - [`rng`]: 7-bag random piece generation and the preview queue
//! - [`scoring`]: Line clear, T-spin, combo and back-to-back scoring
//! - [`snapshot`]: Plain-data view of the game for rendering
//! - [`timing`]: Countdowns, the gravity frame clock and DAS/ARR state
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven draws from one bag holds each piece once
//! - **SRS Rotation**: Super Rotation System with wall kicks (the O piece never kicks)
//! - **Lock Delay**: configurable, cancelled by any successful move or rotation
//! - **Hold**: Store one piece for later use (once per piece)
//! - **T-Spin Detection**: three of the four corners around the T's pivot are blocked
//! - **Scoring**: guideline tables scaled by level, with combo and back-to-back bonuses
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameState;
//! use srs_tetris_types::{EngineConfig, GameAction};
//!
//! let mut game = GameState::new(EngineConfig::default(), 12345);
//!
//! game.apply_intent(GameAction::MoveRightPressed, 0);
//! game.apply_intent(GameAction::MoveRightReleased, 16);
//! game.apply_intent(GameAction::RotateCw, 32);
//! game.apply_intent(GameAction::HardDrop, 48);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.take_last_event().map(|e| e.lines_cleared), Some(0));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance`] once per rendered frame with a millisecond
//! timestamp. Gravity runs on a 60 Hz frame count taken from the level table,
//! while DAS, ARR and lock delay are millisecond countdowns.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, try_rotate, RotationResult};
pub use rng::{PieceQueue, PieceSource, SevenBag, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
