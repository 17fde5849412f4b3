//! Timing module - countdowns driven by injected time
//!
//! Every timer counts clock units (1/60 ms), so a 60 Hz frame is exactly
//! [`FRAME_UNITS`] and millisecond settings convert without rounding.
//! Nothing in here reads a clock; [`GameState::advance`](crate::GameState::advance)
//! feeds elapsed units in and asks what is due.

use crate::types::{CLOCK_UNITS_PER_MS, FRAME_UNITS};

/// Convert milliseconds to clock units
#[inline]
pub fn ms_to_units(ms: u64) -> u64 {
    ms.saturating_mul(CLOCK_UNITS_PER_MS)
}

/// A one-shot countdown that is either idle or running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining: Option<u64>,
}

impl Countdown {
    pub fn start(&mut self, units: u64) {
        self.remaining = Some(units);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Units left, or `None` when idle
    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    /// Let `units` pass; never underflows
    pub fn consume(&mut self, units: u64) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(units);
        }
    }

    /// Running and expired
    pub fn is_due(&self) -> bool {
        self.remaining == Some(0)
    }

    /// If expired, go idle and report it
    pub fn take_due(&mut self) -> bool {
        if self.is_due() {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}

/// Frame accumulator for gravity
///
/// Tracks progress through the current frame and how many whole frames the
/// active piece has waited since it last moved down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityClock {
    /// Units into the current frame, always below [`FRAME_UNITS`]
    sub_frame: u64,
    /// Whole frames counted toward the next row
    frames: u32,
}

impl GravityClock {
    /// Units until the next frame boundary (never 0)
    pub fn until_next_frame(&self) -> u64 {
        FRAME_UNITS - self.sub_frame
    }

    /// Let `units` pass; callers never step past the next frame boundary
    pub fn consume(&mut self, units: u64) {
        self.sub_frame += units.min(self.until_next_frame());
    }

    /// If a frame boundary was reached, count it and return true
    pub fn take_frame(&mut self) -> bool {
        if self.sub_frame >= FRAME_UNITS {
            self.sub_frame -= FRAME_UNITS;
            self.frames = self.frames.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Whole frames counted since the last row step
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Start counting toward the next row from zero
    pub fn reset_row(&mut self) {
        self.frames = 0;
    }

    /// Back to the beginning of a frame with nothing counted
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Horizontal auto-shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    pub fn dx(self) -> i8 {
        match self {
            ShiftDirection::Left => -1,
            ShiftDirection::Right => 1,
        }
    }
}

/// Where the held direction is in its DAS/ARR cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftPhase {
    #[default]
    Idle,
    /// Waiting out DAS
    Charging,
    /// Shifting every ARR (or instantly with ARR 0)
    Repeating,
}

/// Delayed auto shift state for one held direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoShift {
    direction: Option<ShiftDirection>,
    phase: ShiftPhase,
    timer: Countdown,
}

impl AutoShift {
    pub fn direction(&self) -> Option<ShiftDirection> {
        self.direction
    }

    pub fn phase(&self) -> ShiftPhase {
        self.phase
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }

    /// Begin charging `direction`, replacing whatever was held before
    pub fn press(&mut self, direction: ShiftDirection, das_units: u64) {
        self.direction = Some(direction);
        self.phase = ShiftPhase::Charging;
        self.timer.start(das_units);
    }

    /// Stop if `direction` is the one being held. Returns whether anything stopped.
    pub fn release(&mut self, direction: ShiftDirection) -> bool {
        if self.direction != Some(direction) {
            return false;
        }
        self.cancel();
        true
    }

    /// Switch from charging to repeating; `arr_units` of `None` means no repeat timer (ARR 0)
    pub fn begin_repeat(&mut self, arr_units: Option<u64>) {
        self.phase = ShiftPhase::Repeating;
        match arr_units {
            Some(units) => self.timer.start(units),
            None => self.timer.cancel(),
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
