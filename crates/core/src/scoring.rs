//! Scoring module - line scores, level curve and gravity interval.
//!
//! Points for a multi-line clear are `LINE_SCORES[cleared] * level` where
//! `cleared` counts the rows completed by one lock. Level is derived from
//! total lines and gravity speeds up monotonically with level, floored at
//! 100 ms.

use linefall_types::{
    BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, HARD_DROP_REWARD, LINE_SCORES,
};

/// Points for clearing `cleared` rows in one sweep at the given level.
pub fn line_clear_score(cleared: u32, level: u32) -> u32 {
    if cleared == 0 || cleared > 4 {
        return 0;
    }
    LINE_SCORES[cleared as usize] * level
}

/// Level for a total line count: `lines / 10 + 1`.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / 10 + 1
}

/// Milliseconds between gravity steps: `max(100, 1000 - (level-1)*100)`.
pub fn gravity_interval_ms(level: u32) -> u32 {
    let decay = level.saturating_sub(1).saturating_mul(GRAVITY_STEP_MS);
    BASE_GRAVITY_MS.saturating_sub(decay).max(GRAVITY_FLOOR_MS)
}

/// Points for a hard drop that descended `rows` rows.
pub fn hard_drop_score(rows: u32) -> u32 {
    rows * HARD_DROP_REWARD
}
