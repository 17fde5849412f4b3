//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, scoring
//! and timing. It owns the lifecycle state machine and turns intents and elapsed
//! time into piece movement, locks, line clears and score.
//!
//! Time only moves when the caller supplies a timestamp. [`GameState::advance`]
//! walks the elapsed interval event by event (auto-shift, gravity frame, lock
//! delay, in that order at equal deadlines), so one large step and many small
//! ones land in the same state.

use crate::board::Board;
use crate::pieces::{get_shape, try_rotate};
use crate::rng::{PieceQueue, PieceSource, SevenBag};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, gravity_frames_per_row, is_t_spin,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timing::{ms_to_units, AutoShift, Countdown, GravityClock, ShiftDirection, ShiftPhase};
use crate::types::{
    EngineConfig, GameAction, Lifecycle, LockEvent, PieceKind, Rotation, BOARD_WIDTH,
    SPAWN_POSITION,
};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> [(i8, i8); 4] {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece fits on `board` where it is
    pub fn fits(&self, board: &Board) -> bool {
        board.is_placement_legal(self.kind, self.rotation, self.x, self.y)
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Complete game state
///
/// Generic over where pieces come from; the default is the seeded 7-bag.
#[derive(Debug, Clone)]
pub struct GameState<S: PieceSource = SevenBag> {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    source: S,
    score: u32,
    lines: u32,
    level: u32,
    /// -1 means no chain
    combo: i32,
    back_to_back: bool,
    lifecycle: Lifecycle,
    /// Lifecycle to restore when unpausing
    resume_to: Lifecycle,
    gravity: GravityClock,
    lock: Countdown,
    shift: AutoShift,
    /// Baseline for the next `advance`; `None` until the first timestamp
    last_timestamp_ms: Option<u64>,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<SevenBag> {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(config: EngineConfig, seed: u32) -> Self {
        Self::with_source(config, SevenBag::new(seed))
    }
}

impl Default for GameState<SevenBag> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), 1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a game drawing pieces from `source` and spawn the first piece
    pub fn with_source(config: EngineConfig, source: S) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            config,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            queue: PieceQueue::new(),
            source,
            score: 0,
            lines: 0,
            level: config.start_level,
            combo: -1,
            back_to_back: false,
            lifecycle: Lifecycle::Spawning,
            resume_to: Lifecycle::Falling,
            gravity: GravityClock::default(),
            lock: Countdown::default(),
            shift: AutoShift::default(),
            last_timestamp_ms: None,
            last_event: None,
        };
        state.queue.fill_from(&mut state.source, config.preview_len());
        state.spawn_next();
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply new settings without restarting.
    ///
    /// A start level change recomputes the level immediately. Lock delay and
    /// DAS changes apply the next time those countdowns start.
    pub fn set_config(&mut self, config: EngineConfig) {
        let config = config.sanitized();
        let previous = std::mem::replace(&mut self.config, config);

        if config.start_level != previous.start_level {
            self.level = calculate_level(self.lines, config.start_level);
        }
        self.queue.fill_from(&mut self.source, config.preview_len());

        if self.shift.phase() == ShiftPhase::Repeating {
            match self.arr_units() {
                None => self.shift.timer_mut().cancel(),
                Some(units) if !self.shift.timer().is_running() => {
                    self.shift.timer_mut().start(units)
                }
                Some(_) => {}
            }
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn paused(&self) -> bool {
        self.lifecycle == Lifecycle::Paused
    }

    pub fn game_over(&self) -> bool {
        self.lifecycle == Lifecycle::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Every queued kind, front first (may exceed the preview count after a live change)
    pub fn next_queue(&self) -> &[PieceKind] {
        self.queue.as_slice()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn auto_shift(&self) -> &AutoShift {
        &self.shift
    }

    /// Whether the lock-delay countdown is running
    pub fn lock_pending(&self) -> bool {
        self.lock.is_running()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = if self.config.ghost_enabled {
            self.ghost_y()
        } else {
            None
        };
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next_queue.clear();
        out.next_queue.extend(
            self.queue
                .as_slice()
                .iter()
                .copied()
                .take(self.config.preview_len()),
        );
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.lifecycle = self.lifecycle;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance(active) as i8)
    }

    /// Advance to `timestamp_ms` and apply one intent.
    ///
    /// Returns whether the intent changed anything.
    pub fn apply_intent(&mut self, action: GameAction, timestamp_ms: u64) -> bool {
        self.advance(timestamp_ms);
        self.handle_action(action)
    }

    /// Run timers up to `timestamp_ms`.
    ///
    /// The first call only records the baseline. A timestamp older than the
    /// baseline advances nothing. Time spent paused or in game over is skipped.
    pub fn advance(&mut self, timestamp_ms: u64) {
        let elapsed_ms = match self.last_timestamp_ms {
            Some(previous) => {
                self.last_timestamp_ms = Some(previous.max(timestamp_ms));
                timestamp_ms.saturating_sub(previous)
            }
            None => {
                self.last_timestamp_ms = Some(timestamp_ms);
                0
            }
        };

        if !self.lifecycle.is_running() {
            return;
        }
        self.run_for(ms_to_units(elapsed_ms));
    }

    fn run_for(&mut self, mut budget: u64) {
        while self.lifecycle.is_running() {
            let mut step = budget.min(self.gravity.until_next_frame());
            if let Some(remaining) = self.shift.timer().remaining() {
                step = step.min(remaining);
            }
            if let Some(remaining) = self.lock.remaining() {
                step = step.min(remaining);
            }

            budget -= step;
            self.gravity.consume(step);
            self.shift.timer_mut().consume(step);
            self.lock.consume(step);

            let fired = self.fire_due_events();
            if budget == 0 && !fired {
                break;
            }
        }
    }

    /// Fire whatever is due: auto-shift, then gravity, then lock
    fn fire_due_events(&mut self) -> bool {
        let mut fired = false;

        if self.shift.timer_mut().take_due() {
            fired = true;
            self.on_shift_timer();
        }
        if self.lifecycle.is_running() && self.gravity.take_frame() {
            fired = true;
            // Instant repeat has no timer of its own and rides the frame
            if self.shift.phase() == ShiftPhase::Repeating && self.arr_units().is_none() {
                self.drain_shift();
            }
            self.on_gravity_frame();
        }
        if self.lifecycle.is_running() && self.lock.take_due() {
            fired = true;
            self.lock_active(0);
        }

        fired
    }

    fn on_shift_timer(&mut self) {
        let Some(direction) = self.shift.direction() else {
            return;
        };
        match self.shift.phase() {
            ShiftPhase::Idle => {}
            ShiftPhase::Charging => {
                let arr = self.arr_units();
                self.shift.begin_repeat(arr);
                if arr.is_none() {
                    self.drain_shift();
                }
            }
            ShiftPhase::Repeating => match self.arr_units() {
                Some(units) => {
                    self.shift_active(direction.dx());
                    self.shift.timer_mut().start(units);
                }
                None => self.drain_shift(),
            },
        }
    }

    fn on_gravity_frame(&mut self) {
        if self.gravity.frames() < gravity_frames_per_row(self.level) {
            return;
        }
        self.gravity.reset_row();

        if self.try_move(0, 1) {
            self.release_lock();
        } else if !self.lock.is_running() {
            self.lock
                .start(ms_to_units(u64::from(self.config.lock_delay_ms)));
            self.lifecycle = Lifecycle::LockPending;
        }
    }

    /// ARR in clock units, or `None` for instant repeat
    fn arr_units(&self) -> Option<u64> {
        match self.config.arr_ms {
            0 => None,
            ms => Some(ms_to_units(u64::from(ms))),
        }
    }

    fn handle_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Reset => {
                self.reset();
                true
            }
            _ if self.lifecycle == Lifecycle::GameOver => false,
            GameAction::Pause => self.toggle_pause(),
            GameAction::MoveLeftReleased => self.shift.release(ShiftDirection::Left),
            GameAction::MoveRightReleased => self.shift.release(ShiftDirection::Right),
            _ if !self.lifecycle.is_running() => false,
            GameAction::MoveLeftPressed => self.press_shift(ShiftDirection::Left),
            GameAction::MoveRightPressed => self.press_shift(ShiftDirection::Right),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
        }
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }

        false
    }

    /// A successful move or rotation puts a grounded piece back to falling
    fn release_lock(&mut self) {
        self.lock.cancel();
        self.lifecycle = Lifecycle::Falling;
    }

    fn shift_active(&mut self, dx: i8) -> bool {
        if self.try_move(dx, 0) {
            self.release_lock();
            true
        } else {
            false
        }
    }

    /// Shift until blocked, at most a board width
    fn drain_shift(&mut self) {
        let Some(direction) = self.shift.direction() else {
            return;
        };
        for _ in 0..BOARD_WIDTH {
            if !self.shift_active(direction.dx()) {
                break;
            }
        }
    }

    fn press_shift(&mut self, direction: ShiftDirection) -> bool {
        self.shift
            .press(direction, ms_to_units(u64::from(self.config.das_ms)));
        self.shift_active(direction.dx());
        true
    }

    fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.release_lock();
        self.score = self
            .score
            .saturating_add(calculate_drop_score(1, self.level, false));
        true
    }

    /// Rows the piece can fall before it is blocked
    fn drop_distance(&self, piece: Tetromino) -> u32 {
        let mut distance = 0;
        while piece.shifted(0, distance as i8 + 1).fits(&self.board) {
            distance += 1;
        }
        distance
    }

    /// Hard drop the active piece to the bottom and lock it
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let distance = self.drop_distance(active);
        self.active = Some(active.shifted(0, distance as i8));

        let drop_score = calculate_drop_score(distance, self.level, true);
        self.score = self.score.saturating_add(drop_score);
        self.lock_active(drop_score);
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |rotation, x, y| board.is_placement_legal(active.kind, rotation, x, y),
        );

        match result {
            Some(result) => {
                self.active = Some(Tetromino {
                    rotation: result.rotation,
                    x: result.x,
                    y: result.y,
                    ..active
                });
                self.release_lock();
                true
            }
            None => false,
        }
    }

    /// Swap active piece with hold piece
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => self.spawn_kind(held),
            None => self.spawn_next(),
        };
        self.can_hold = false;
        true
    }

    fn toggle_pause(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Paused {
            self.lifecycle = self.resume_to;
        } else {
            self.resume_to = self.lifecycle;
            self.lifecycle = Lifecycle::Paused;
        }
        true
    }

    /// Spawn a new piece from the queue
    fn spawn_next(&mut self) -> bool {
        self.lifecycle = Lifecycle::Spawning;
        let kind = self
            .queue
            .pop(&mut self.source, self.config.preview_len());
        self.spawn_kind(kind)
    }

    /// Place `kind` at the spawn point, or end the game if it does not fit
    fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        self.lifecycle = Lifecycle::Spawning;
        self.gravity.reset_row();
        self.lock.cancel();
        self.can_hold = true;

        let piece = Tetromino::new(kind);
        if !piece.fits(&self.board) {
            self.active = None;
            self.shift.cancel();
            self.lifecycle = Lifecycle::GameOver;
            return false;
        }

        self.active = Some(piece);
        self.lifecycle = Lifecycle::Falling;
        true
    }

    /// Lock the active piece onto the board, score it and spawn the next one
    fn lock_active(&mut self, drop_score: u32) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.lock.cancel();

        // Corners are judged before the piece joins the board
        let t_spin = is_t_spin(&self.board, piece.kind, piece.x, piece.y);
        self.board
            .merge(piece.kind, piece.rotation, piece.x, piece.y);
        let lines_cleared = self.board.clear_full_rows().len() as u32;

        let result = calculate_score(
            lines_cleared,
            self.level,
            t_spin,
            self.combo,
            self.back_to_back,
        );
        self.score = self.score.saturating_add(result.total);
        self.lines = self.lines.saturating_add(lines_cleared);
        self.combo = result.combo;
        self.back_to_back = result.back_to_back;
        if lines_cleared > 0 {
            self.level = calculate_level(self.lines, self.config.start_level);
        }

        self.lifecycle = Lifecycle::Cleared;
        self.last_event = Some(LockEvent {
            lines_cleared,
            t_spin,
            line_clear_score: result.total,
            drop_score,
            combo: self.combo,
            back_to_back: self.back_to_back,
            b2b_applied: result.b2b_applied,
        });

        self.spawn_next();
    }

    /// Start over: empty board, fresh score, new bag, every timer cancelled
    fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = self.config.start_level;
        self.combo = -1;
        self.back_to_back = false;
        self.resume_to = Lifecycle::Falling;
        self.gravity.reset();
        self.lock.cancel();
        self.shift.cancel();
        self.last_event = None;

        self.queue.clear();
        self.source.restart();
        self.queue
            .fill_from(&mut self.source, self.config.preview_len());
        self.spawn_next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deals a fixed sequence, repeating it forever
    #[derive(Debug, Clone)]
    struct Script {
        kinds: Vec<PieceKind>,
        next: usize,
    }

    impl PieceSource for Script {
        fn draw(&mut self) -> PieceKind {
            let kind = self.kinds[self.next % self.kinds.len()];
            self.next += 1;
            kind
        }

        fn restart(&mut self) {
            self.next = 0;
        }
    }

    fn scripted(config: EngineConfig, kinds: &[PieceKind]) -> GameState<Script> {
        let mut state = GameState::with_source(
            config,
            Script {
                kinds: kinds.to_vec(),
                next: 0,
            },
        );
        state.advance(0);
        state
    }

    fn game(kinds: &[PieceKind]) -> GameState<Script> {
        scripted(EngineConfig::default(), kinds)
    }

    /// Level 20 falls one row per frame, which keeps timing tests short
    fn fast_game(kinds: &[PieceKind]) -> GameState<Script> {
        scripted(
            EngineConfig {
                start_level: 20,
                ..EngineConfig::default()
            },
            kinds,
        )
    }

    #[test]
    fn test_new_game_spawns_first_piece() {
        let state = game(&[PieceKind::T, PieceKind::I]);

        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), SPAWN_POSITION);
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(state.lifecycle(), Lifecycle::Falling);
        assert_eq!(state.next_queue().len(), 5);
        assert_eq!(state.next_queue()[0], PieceKind::I);
        assert_eq!(state.level(), 1);
        assert_eq!(state.combo(), -1);
        assert!(state.can_hold());
    }

    #[test]
    fn test_seeded_games_match() {
        let a = GameState::new(EngineConfig::default(), 42);
        let b = GameState::new(EngineConfig::default(), 42);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_i_hard_drop_lands_on_floor() {
        let mut state = game(&[PieceKind::I, PieceKind::O]);

        assert!(state.apply_intent(GameAction::HardDrop, 0));

        for x in 3..=6 {
            assert_eq!(state.board().get(x, 21), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.lines(), 0);
        // 20 rows at 2 points per row, level 1
        assert_eq!(state.score(), 40);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.drop_score, 40);
        assert_eq!(event.line_clear_score, 0);
        assert!(state.take_last_event().is_none());

        assert_eq!(state.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_o_drop_clears_one_line() {
        let mut state = game(&[PieceKind::O]);
        *state.board_mut() = Board::from_rows(&["#.........", "####..####"]);

        assert!(state.apply_intent(GameAction::HardDrop, 0));

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100 + 40);
        assert_eq!(state.combo(), 0);
        assert!(!state.back_to_back());

        // Row 20 moved down onto the floor, merged with the O's top half
        let bottom: Vec<bool> = (0..10).map(|x| state.board().is_occupied(x, 21)).collect();
        assert_eq!(
            bottom,
            vec![true, false, false, false, true, true, false, false, false, false]
        );
        assert!(state.board().rows().take(21).all(|row| row.iter().all(|c| c.is_none())));

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.line_clear_score, 100);
    }

    #[test]
    fn test_t_spin_double_scores_from_t_table() {
        let mut state = game(&[PieceKind::T]);
        *state.board_mut() = Board::from_rows(&[".#........", "#...######", "##.#######"]);
        state.active = Some(Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 2,
            y: 20,
        });

        assert!(state.apply_intent(GameAction::HardDrop, 0));

        let event = state.take_last_event().unwrap();
        assert!(event.t_spin);
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.line_clear_score, 1200);
        assert!(event.back_to_back);
        assert_eq!(state.score(), 1200);
    }

    #[test]
    fn test_hold_twice_is_noop() {
        let mut state = game(&[PieceKind::T, PieceKind::I, PieceKind::O]);

        assert!(state.apply_intent(GameAction::Hold, 0));
        assert_eq!(state.hold_piece(), Some(PieceKind::T));
        assert_eq!(state.active().unwrap().kind, PieceKind::I);
        assert!(!state.can_hold());

        let before = state.snapshot();
        assert!(!state.apply_intent(GameAction::Hold, 0));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_hold_swaps_after_lock() {
        let mut state = game(&[PieceKind::T, PieceKind::I, PieceKind::O]);

        state.apply_intent(GameAction::Hold, 0);
        state.apply_intent(GameAction::HardDrop, 0);
        assert!(state.can_hold());
        assert_eq!(state.active().unwrap().kind, PieceKind::O);

        assert!(state.apply_intent(GameAction::Hold, 0));
        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), SPAWN_POSITION);
        assert_eq!(state.hold_piece(), Some(PieceKind::O));
    }

    #[test]
    fn test_gravity_at_level_one() {
        let mut state = game(&[PieceKind::T]);

        // 48 frames per row is 800 ms
        state.advance(799);
        assert_eq!(state.active().unwrap().y, 1);
        state.advance(800);
        assert_eq!(state.active().unwrap().y, 2);
        state.advance(1600);
        assert_eq!(state.active().unwrap().y, 3);
    }

    #[test]
    fn test_lock_delay_runs_after_blocked_gravity() {
        let mut state = fast_game(&[PieceKind::I, PieceKind::O]);

        // 20 rows in 20 frames, the 21st frame (350 ms) finds the floor
        state.advance(349);
        assert_eq!(state.active().unwrap().y, 21);
        assert_eq!(state.lifecycle(), Lifecycle::Falling);

        state.advance(350);
        assert_eq!(state.lifecycle(), Lifecycle::LockPending);

        state.advance(849);
        assert_eq!(state.active().unwrap().kind, PieceKind::I);

        state.advance(850);
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
        let event = state.take_last_event().unwrap();
        assert_eq!(event.drop_score, 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_move_cancels_lock_countdown() {
        let mut state = fast_game(&[PieceKind::I, PieceKind::O]);
        state.advance(350);
        assert!(state.lock_pending());

        assert!(state.apply_intent(GameAction::RotateCw, 400));
        assert_eq!(state.lifecycle(), Lifecycle::Falling);
        assert!(!state.lock_pending());
    }

    #[test]
    fn test_pause_freezes_lock_countdown() {
        let mut state = fast_game(&[PieceKind::I, PieceKind::O]);
        state.advance(600);
        assert_eq!(state.lifecycle(), Lifecycle::LockPending);

        assert!(state.apply_intent(GameAction::Pause, 600));
        assert!(state.paused());
        state.advance(5000);
        assert!(!state.apply_intent(GameAction::HardDrop, 5000));

        assert!(state.apply_intent(GameAction::Pause, 5000));
        assert_eq!(state.lifecycle(), Lifecycle::LockPending);

        // 250 ms were left when the pause started
        state.advance(5249);
        assert_eq!(state.active().unwrap().kind, PieceKind::I);
        state.advance(5250);
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_pause_freezes_das() {
        let mut state = game(&[PieceKind::T]);
        state.apply_intent(GameAction::MoveRightPressed, 0);
        assert_eq!(state.active().unwrap().x, 5);

        state.apply_intent(GameAction::Pause, 100);
        state.apply_intent(GameAction::Pause, 1000);
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Charging);

        // 30 ms of DAS remain
        state.advance(1029);
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Charging);
        state.advance(1030);
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Repeating);
    }

    #[test]
    fn test_reset_cancels_everything() {
        let mut state = fast_game(&[PieceKind::I, PieceKind::T, PieceKind::O]);
        state.apply_intent(GameAction::HardDrop, 0);
        state.apply_intent(GameAction::Hold, 0);
        state.apply_intent(GameAction::MoveLeftPressed, 0);
        state.advance(600);
        assert!(state.lock_pending());

        assert!(state.apply_intent(GameAction::Reset, 600));

        assert_eq!(state.lifecycle(), Lifecycle::Falling);
        assert!(!state.lock_pending());
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.hold_piece(), None);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
        assert_eq!(state.active().unwrap(), Tetromino::new(PieceKind::I));
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_large_gap_matches_small_steps() {
        let config = EngineConfig {
            start_level: 12,
            ..EngineConfig::default()
        };
        let mut big = GameState::new(config, 9);
        let mut small = GameState::new(config, 9);
        big.advance(0);
        small.advance(0);

        big.advance(20_000);
        let mut t = 0;
        while t < 20_000 {
            t = (t + 7).min(20_000);
            small.advance(t);
        }

        assert_eq!(big.snapshot(), small.snapshot());
    }

    #[test]
    fn test_das_then_arr() {
        let mut state = game(&[PieceKind::T]);

        state.apply_intent(GameAction::MoveRightPressed, 0);
        assert_eq!(state.active().unwrap().x, 5);

        state.advance(129);
        assert_eq!(state.active().unwrap().x, 5);
        state.advance(130);
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Repeating);
        assert_eq!(state.active().unwrap().x, 5);

        state.advance(150);
        assert_eq!(state.active().unwrap().x, 6);
        state.advance(190);
        assert_eq!(state.active().unwrap().x, 8);

        // Wall
        state.advance(300);
        assert_eq!(state.active().unwrap().x, 8);

        assert!(state.apply_intent(GameAction::MoveRightReleased, 300));
        assert_eq!(state.auto_shift().phase(), ShiftPhase::Idle);
    }

    #[test]
    fn test_zero_arr_drains_to_wall() {
        let mut state = scripted(
            EngineConfig {
                arr_ms: 0,
                ..EngineConfig::default()
            },
            &[PieceKind::T],
        );

        state.apply_intent(GameAction::MoveLeftPressed, 0);
        assert_eq!(state.active().unwrap().x, 3);
        state.advance(130);
        assert_eq!(state.active().unwrap().x, 1);
    }

    #[test]
    fn test_zero_arr_carries_next_piece_to_wall_on_frame() {
        let mut state = scripted(
            EngineConfig {
                arr_ms: 0,
                ..EngineConfig::default()
            },
            &[PieceKind::T, PieceKind::O],
        );

        state.apply_intent(GameAction::MoveLeftPressed, 0);
        state.advance(130);
        assert!(state.apply_intent(GameAction::HardDrop, 130));
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
        assert_eq!(state.active().unwrap().x, 4);

        // Frame 8 falls at 133.3 ms
        state.advance(133);
        assert_eq!(state.active().unwrap().x, 4);
        state.advance(134);
        assert_eq!(state.active().unwrap().x, 0);
    }

    #[test]
    fn test_zero_arr_held_left_matches_small_steps() {
        let config = EngineConfig {
            arr_ms: 0,
            start_level: 20,
            ..EngineConfig::default()
        };
        let mut big = GameState::new(config, 3);
        big.advance(0);
        big.apply_intent(GameAction::MoveLeftPressed, 0);
        let mut small = big.clone();

        big.advance(2000);
        let mut t = 0;
        while t < 2000 {
            t = (t + 16).min(2000);
            small.advance(t);
        }

        assert_eq!(big.snapshot(), small.snapshot());
    }

    #[test]
    fn test_release_of_other_direction_ignored() {
        let mut state = game(&[PieceKind::T]);
        state.apply_intent(GameAction::MoveLeftPressed, 0);

        assert!(!state.apply_intent(GameAction::MoveRightReleased, 10));
        assert_eq!(state.auto_shift().direction(), Some(ShiftDirection::Left));

        // New press takes over
        state.apply_intent(GameAction::MoveRightPressed, 20);
        assert_eq!(state.auto_shift().direction(), Some(ShiftDirection::Right));
        assert_eq!(state.active().unwrap().x, 4);
    }

    #[test]
    fn test_soft_drop_scores_flat_point() {
        let mut state = fast_game(&[PieceKind::T]);
        assert!(state.apply_intent(GameAction::SoftDrop, 0));
        assert_eq!(state.active().unwrap().y, 2);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut state = game(&[PieceKind::T]);
        let rows = ["#########."; 21];
        *state.board_mut() = Board::from_rows(&rows);

        assert!(state.apply_intent(GameAction::HardDrop, 0));
        assert!(state.game_over());
        assert!(state.active().is_none());

        assert!(!state.apply_intent(GameAction::HardDrop, 10));
        assert!(!state.apply_intent(GameAction::Pause, 10));
        assert!(!state.apply_intent(GameAction::MoveLeftPressed, 10));

        assert!(state.apply_intent(GameAction::Reset, 20));
        assert_eq!(state.lifecycle(), Lifecycle::Falling);
    }

    #[test]
    fn test_hold_into_blocked_spawn_is_game_over() {
        let mut state = game(&[PieceKind::T, PieceKind::I, PieceKind::O]);
        assert!(state.apply_intent(GameAction::Hold, 0));
        assert!(state.apply_intent(GameAction::HardDrop, 0));
        assert_eq!(state.active().unwrap().kind, PieceKind::O);

        // Clear of the O but under the T's left mino
        state.board_mut().set(3, 1, Some(PieceKind::Z));

        assert!(state.apply_intent(GameAction::Hold, 10));
        assert!(state.game_over());
        assert!(state.active().is_none());
        assert_eq!(state.hold_piece(), Some(PieceKind::O));
        assert!(!state.apply_intent(GameAction::Hold, 20));
    }

    #[test]
    fn test_first_hold_into_blocked_spawn_is_game_over() {
        let mut state = game(&[PieceKind::T, PieceKind::I]);
        // The I spans columns 3..=6 on row 1, the T only reaches 5
        state.board_mut().set(6, 1, Some(PieceKind::Z));

        assert!(state.apply_intent(GameAction::Hold, 0));
        assert!(state.game_over());
        assert_eq!(state.hold_piece(), Some(PieceKind::T));
    }

    #[test]
    fn test_live_config_update() {
        let mut state = game(&[PieceKind::T]);
        state.set_config(EngineConfig {
            start_level: 7,
            preview_count: 2,
            ghost_enabled: false,
            ..EngineConfig::default()
        });

        assert_eq!(state.level(), 7);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.next_queue.len(), 2);
        assert_eq!(snapshot.ghost_y, None);

        state.set_config(EngineConfig::default());
        assert_eq!(state.level(), 1);
        assert_eq!(state.snapshot().ghost_y, Some(21));
    }

    #[test]
    fn test_non_monotonic_timestamp_is_ignored() {
        let mut state = game(&[PieceKind::T]);
        state.advance(700);
        state.advance(100);
        state.advance(799);
        assert_eq!(state.active().unwrap().y, 1);
        state.advance(800);
        assert_eq!(state.active().unwrap().y, 2);
    }
}
