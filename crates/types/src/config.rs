//! Engine configuration
//!
//! Every field has a documented range. Values outside it are clamped by
//! [`EngineConfig::sanitized`], which the engine applies on construction and on
//! every live update, so a malformed config can never put the engine in an
//! invalid state.

use crate::MAX_PREVIEW;

/// DAS (Delayed Auto Shift) default in milliseconds
pub const DEFAULT_DAS_MS: u32 = 130;

/// ARR (Auto Repeat Rate) default in milliseconds; 0 means instant
pub const DEFAULT_ARR_MS: u32 = 20;

/// Lock delay default in milliseconds
pub const DEFAULT_LOCK_DELAY_MS: u32 = 500;

/// Preview queue length default
pub const DEFAULT_PREVIEW_COUNT: u8 = 5;

pub const MAX_DAS_MS: u32 = 400;
pub const MAX_ARR_MS: u32 = 200;
pub const MAX_LOCK_DELAY_MS: u32 = 2000;
pub const MIN_START_LEVEL: u32 = 1;
pub const MAX_START_LEVEL: u32 = 20;

/// Tunable engine settings.
///
/// # Examples
///
/// ```
/// use srs_tetris_types::EngineConfig;
///
/// let config = EngineConfig {
///     preview_count: 12,
///     start_level: 0,
///     ..EngineConfig::default()
/// }
/// .sanitized();
///
/// assert_eq!(config.preview_count, 7);
/// assert_eq!(config.start_level, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", from = "RawEngineConfig")
)]
pub struct EngineConfig {
    /// Delay before a held direction starts repeating (0-400 ms)
    pub das_ms: u32,
    /// Interval between repeated shifts (0-200 ms, 0 = shift until blocked)
    pub arr_ms: u32,
    /// Grace period for a grounded piece (0-2000 ms)
    pub lock_delay_ms: u32,
    /// Upcoming pieces exposed in snapshots (1-7)
    pub preview_count: u8,
    /// Level the game starts at and never drops below (1-20)
    pub start_level: u32,
    /// Rendering hint; the engine only uses it to decide whether to report a ghost row
    pub ghost_enabled: bool,
}

impl EngineConfig {
    /// Clamp every field into its supported range.
    pub fn sanitized(self) -> Self {
        Self {
            das_ms: self.das_ms.min(MAX_DAS_MS),
            arr_ms: self.arr_ms.min(MAX_ARR_MS),
            lock_delay_ms: self.lock_delay_ms.min(MAX_LOCK_DELAY_MS),
            preview_count: self.preview_count.clamp(1, MAX_PREVIEW as u8),
            start_level: self.start_level.clamp(MIN_START_LEVEL, MAX_START_LEVEL),
            ghost_enabled: self.ghost_enabled,
        }
    }

    pub fn preview_len(&self) -> usize {
        self.preview_count as usize
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            lock_delay_ms: DEFAULT_LOCK_DELAY_MS,
            preview_count: DEFAULT_PREVIEW_COUNT,
            start_level: MIN_START_LEVEL,
            ghost_enabled: true,
        }
    }
}

/// Wire form of [`EngineConfig`]: missing fields take defaults, then the
/// whole thing is clamped.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEngineConfig {
    das_ms: u32,
    arr_ms: u32,
    lock_delay_ms: u32,
    preview_count: u8,
    start_level: u32,
    ghost_enabled: bool,
}

#[cfg(feature = "serde")]
impl Default for RawEngineConfig {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            das_ms: config.das_ms,
            arr_ms: config.arr_ms,
            lock_delay_ms: config.lock_delay_ms,
            preview_count: config.preview_count,
            start_level: config.start_level,
            ghost_enabled: config.ghost_enabled,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RawEngineConfig> for EngineConfig {
    fn from(raw: RawEngineConfig) -> Self {
        Self {
            das_ms: raw.das_ms,
            arr_ms: raw.arr_ms,
            lock_delay_ms: raw.lock_delay_ms,
            preview_count: raw.preview_count,
            start_level: raw.start_level,
            ghost_enabled: raw.ghost_enabled,
        }
        .sanitized()
    }
}
