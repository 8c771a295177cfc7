//! Scoring module - line clear points, drop points, and level progression
//!
//! Classic rules: the line clear table is multiplied by the level that was in
//! effect while the piece fell, the level rises every ten lines up to a cap,
//! and each level shortens the fall interval by a fixed step.

use crate::types::{
    BASE_FALL_MS, FALL_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
    MAX_LEVEL, MIN_FALL_MS, MIN_LEVEL,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Anything outside the table (including 0) scores nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Points for a hard drop of `distance` rows.
pub fn hard_drop_score(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a running total of cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    (MIN_LEVEL + total_lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Fall interval in milliseconds for a level.
pub fn fall_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(MIN_LEVEL);
    BASE_FALL_MS
        .saturating_sub(steps.saturating_mul(FALL_STEP_MS))
        .max(MIN_FALL_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_level_one() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 40);
        assert_eq!(line_clear_score(2, 1), 100);
        assert_eq!(line_clear_score(3, 1), 300);
        assert_eq!(line_clear_score(4, 1), 1200);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(line_clear_score(4, 3), 3600);
        assert_eq!(line_clear_score(1, 15), 600);
    }

    #[test]
    fn test_line_scores_beyond_table() {
        assert_eq!(line_clear_score(5, 1), 0);
        assert_eq!(line_clear_score(20, 7), 0);
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0), 0);
        assert_eq!(hard_drop_score(17), 34);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
        assert_eq!(level_for_lines(139), 14);
        assert_eq!(level_for_lines(140), 15);
        assert_eq!(level_for_lines(10_000), 15);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(1), 500);
        assert_eq!(fall_interval_ms(2), 450);
        assert_eq!(fall_interval_ms(9), 100);
        assert_eq!(fall_interval_ms(10), 50);
        assert_eq!(fall_interval_ms(15), 50);
        // Out-of-range levels clamp instead of wrapping.
        assert_eq!(fall_interval_ms(0), 500);
        assert_eq!(fall_interval_ms(u32::MAX), 50);
    }
}
