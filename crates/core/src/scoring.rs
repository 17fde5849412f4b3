//! Scoring module - guideline scoring rules
//!
//! - T-Spin clears use the T-Spin table instead of the line-clear table.
//! - B2B applies a 3/2 multiplier to the base clear points (before combo bonus).
//! - Combo bonus is `combo_base * combo_index * level`.
//! - Every table value is scaled by the level (1-based).

use crate::board::Board;
use crate::pieces::PIVOT_CORNERS;
use crate::types::{
    PieceKind, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, GRAVITY_FRAMES_PER_ROW,
    HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS_PER_ROW,
    TSPIN_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier, excludes combo bonus).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Combo counter after this lock (-1 = no chain)
    pub combo: i32,
    /// Back-to-back flag after this lock
    pub back_to_back: bool,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
}

/// Table points for a standard clear
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Table points for a T-spin clear (0 lines scores nothing)
pub fn calculate_tspin_score(lines: u32, level: u32) -> u32 {
    TSPIN_SCORES
        .get(lines as usize)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Tetris, or a T-spin that cleared something
pub fn is_difficult_clear(lines: u32, t_spin: bool) -> bool {
    lines == 4 || (t_spin && lines > 0)
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Combo bonus for the chain position reached by this clear
pub fn calculate_combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo as u32)
        .saturating_mul(level)
}

/// Score one lock and advance the combo / back-to-back state.
///
/// `previous_combo` and `previous_b2b` are the values before this lock. A lock
/// with no lines resets the combo but leaves the back-to-back flag alone.
pub fn calculate_score(
    lines: u32,
    level: u32,
    t_spin: bool,
    previous_combo: i32,
    previous_b2b: bool,
) -> ScoreResult {
    if lines == 0 {
        return ScoreResult {
            combo: -1,
            back_to_back: previous_b2b,
            ..ScoreResult::default()
        };
    }

    let difficult = is_difficult_clear(lines, t_spin);
    let base_points = if t_spin {
        calculate_tspin_score(lines, level)
    } else {
        calculate_line_score(lines, level)
    };

    let b2b_applied = difficult && previous_b2b;
    let line_clear_score = if b2b_applied {
        apply_b2b_multiplier(base_points)
    } else {
        base_points
    };

    let combo = previous_combo.max(-1) + 1;
    let combo_bonus = calculate_combo_bonus(combo, level);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        combo,
        back_to_back: difficult,
        b2b_applied,
    }
}

/// Calculate drop score
/// soft_drop: flat +1 per row
/// hard_drop: +2 per row, times level
pub fn calculate_drop_score(rows: u32, level: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
            .saturating_mul(level)
    } else {
        rows.saturating_mul(SOFT_DROP_POINTS_PER_ROW)
    }
}

/// Level management
/// Level increases every 10 lines cleared and never drops below the start level
pub fn calculate_level(total_lines: u32, start_level: u32) -> u32 {
    start_level.max(1 + total_lines / LINES_PER_LEVEL)
}

/// Frames a piece waits per row at `level`; levels past the table use its last entry
pub fn gravity_frames_per_row(level: u32) -> u32 {
    let index = (level.max(1) - 1) as usize;
    GRAVITY_FRAMES_PER_ROW[index.min(GRAVITY_FRAMES_PER_ROW.len() - 1)]
}

/// Three-corner T-spin check.
///
/// Counts the pivot's diagonal neighbours that are filled or off the board
/// (side walls and floor; rows above the top count as open). Only meaningful
/// for a T, evaluated before the piece is merged.
pub fn is_t_spin(board: &Board, kind: PieceKind, x: i8, y: i8) -> bool {
    if kind != PieceKind::T {
        return false;
    }
    let blocked = PIVOT_CORNERS
        .iter()
        .filter(|&&(dx, dy)| !board.is_open(x + dx, y + dy))
        .count();
    blocked >= 3
}
