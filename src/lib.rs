//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the engine as `srs_tetris::core` and the shared vocabulary as
//! `srs_tetris::types`; the implementation lives in dedicated crates under `crates/`.

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;
