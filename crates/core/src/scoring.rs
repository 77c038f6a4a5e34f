//! Scoring module - classic line-clear tiers, drop points, levels and gravity
//!
//! Line clears pay `LINE_SCORES[lines] * (level + 1)`. Drops pay per cell
//! travelled. The level rises every `LINES_PER_LEVEL` lines on top of the
//! configured start level, and gravity follows the level curve unless a fixed
//! interval is configured.

use serde::{Deserialize, Serialize};

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Gravity source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    /// Interval from the per-level table
    #[default]
    LevelCurve,
    /// Same interval at every level
    FixedMs(u32),
}

impl Gravity {
    pub fn interval_ms(&self, level: u32) -> u32 {
        match *self {
            Gravity::LevelCurve => get_drop_interval_ms(level),
            Gravity::FixedMs(ms) => ms.max(1),
        }
    }
}

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level after clearing `total_lines`, starting from `start_level`
pub fn calculate_level(start_level: u32, total_lines: u32) -> u32 {
    start_level.saturating_add(total_lines / LINES_PER_LEVEL)
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_out_of_range_clears_score_nothing() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0, 0), 0);
        assert_eq!(calculate_level(0, 9), 0);
        assert_eq!(calculate_level(0, 10), 1);
        assert_eq!(calculate_level(0, 29), 2);
        assert_eq!(calculate_level(3, 10), 4);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(8), 160);
        assert_eq!(get_drop_interval_ms(9), 120);
        assert_eq!(get_drop_interval_ms(20), 120);
    }

    #[test]
    fn test_fixed_gravity_ignores_level() {
        assert_eq!(Gravity::FixedMs(1000).interval_ms(0), 1000);
        assert_eq!(Gravity::FixedMs(1000).interval_ms(12), 1000);
        assert_eq!(Gravity::FixedMs(0).interval_ms(0), 1);
        assert_eq!(Gravity::LevelCurve.interval_ms(5), 320);
    }
}
