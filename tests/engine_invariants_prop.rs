//! Property/invariant tests for the engine.
//!
//! Generated seeds, intent streams and timestamp gaps drive the public API;
//! after every call the observable state must stay consistent:
//! - the active piece (if any) sits on legal cells
//! - no full row survives a call
//! - score and lines never decrease except on reset
//! - level never drops below the start level, combo never below -1
//! - the snapshot preview has exactly `preview_count` entries
//!
//! Time must also be indifferent to how it is sliced, with or without a
//! direction held.

use proptest::prelude::*;
use srs_tetris::core::GameState;
use srs_tetris::types::{EngineConfig, GameAction, BOARD_HEIGHT};

const ACTIONS: [GameAction; 11] = [
    GameAction::MoveLeftPressed,
    GameAction::MoveLeftReleased,
    GameAction::MoveRightPressed,
    GameAction::MoveRightReleased,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::RotateCw,
    GameAction::RotateCcw,
    GameAction::Hold,
    GameAction::Pause,
    GameAction::Reset,
];

fn assert_consistent(state: &GameState) {
    if let Some(active) = state.active() {
        assert!(active.fits(state.board()), "active piece overlaps: {active:?}");
    }
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!state.board().is_row_full(y), "row {y} left full");
    }
    assert!(state.level() >= state.config().start_level);
    assert!(state.combo() >= -1);
    assert_eq!(
        state.snapshot().next_queue.len(),
        state.config().preview_len()
    );
}

fn config_strategy() -> impl Strategy<Value = EngineConfig> {
    (0u32..=400, 0u32..=200, 0u32..=2000, 1u8..=7, 1u32..=20, any::<bool>()).prop_map(
        |(das_ms, arr_ms, lock_delay_ms, preview_count, start_level, ghost_enabled)| EngineConfig {
            das_ms,
            arr_ms,
            lock_delay_ms,
            preview_count,
            start_level,
            ghost_enabled,
        },
    )
}

proptest! {
    #[test]
    fn generated_intents_keep_engine_consistent(
        seed in any::<u32>(),
        config in config_strategy(),
        steps in prop::collection::vec((0usize..ACTIONS.len(), 0u64..400), 1..200),
    ) {
        let mut state = GameState::new(config, seed);
        let mut ts = 0u64;
        state.advance(ts);
        assert_consistent(&state);

        for (action_index, gap) in steps {
            let action = ACTIONS[action_index];
            let (score, lines) = (state.score(), state.lines());

            ts += gap;
            state.apply_intent(action, ts);
            assert_consistent(&state);

            if action != GameAction::Reset {
                prop_assert!(state.score() >= score);
                prop_assert!(state.lines() >= lines);
            }
        }
    }

    #[test]
    fn one_big_advance_equals_many_small_ones(
        seed in any::<u32>(),
        config in config_strategy(),
        zero_arr in any::<bool>(),
        held in prop::option::of(any::<bool>()),
        total in 0u64..30_000,
        chunk in 1u64..500,
    ) {
        let config = EngineConfig {
            arr_ms: if zero_arr { 0 } else { config.arr_ms },
            ..config
        };
        let mut big = GameState::new(config, seed);
        big.advance(0);
        match held {
            Some(true) => big.apply_intent(GameAction::MoveLeftPressed, 0),
            Some(false) => big.apply_intent(GameAction::MoveRightPressed, 0),
            None => false,
        };
        let mut small = big.clone();

        big.advance(total);
        let mut ts = 0;
        while ts < total {
            ts = (ts + chunk).min(total);
            small.advance(ts);
        }

        prop_assert_eq!(big.snapshot(), small.snapshot());
    }
}
