//! Cumulative XP threshold table.
//!
//! Level `N` requires `xp >= thresholds[N - 1]`, so the first entry is the
//! level-1 floor (0) and the table length is the level cap.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL_THRESHOLDS: [u64; 13] = [
    0, 100, 250, 500, 800, 1200, 1700, 2300, 3000, 4000, 5000, 7500, 10000,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

/// Where the player sits inside their current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the current level's threshold.
    pub xp_into_level: u64,
    /// XP between the current and the next threshold; `None` at the cap.
    pub level_span: Option<u64>,
    pub pct: f64,
}

impl LevelTable {
    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    /// XP required to reach `level`, if that level exists.
    pub fn threshold_for(&self, level: u32) -> Option<u64> {
        let idx = (level as usize).checked_sub(1)?;
        self.thresholds.get(idx).copied()
    }

    /// Level implied by `xp` alone.
    pub fn level_for(&self, xp: u64) -> u32 {
        self.advance(1, xp)
    }

    /// Raise `current` while `xp` clears the next threshold; never lowers it.
    pub fn advance(&self, current: u32, xp: u64) -> u32 {
        let mut level = current.max(1);
        while (level as usize) < self.thresholds.len() && xp >= self.thresholds[level as usize] {
            level += 1;
        }
        level
    }

    pub fn progress(&self, level: u32, xp: u64) -> LevelProgress {
        let floor = self.threshold_for(level).unwrap_or(0);
        let xp_into_level = xp.saturating_sub(floor);
        match self.threshold_for(level + 1) {
            Some(next) => {
                let span = next.saturating_sub(floor);
                let pct = if span == 0 {
                    0.0
                } else {
                    (xp_into_level as f64 / span as f64 * 100.0).min(100.0)
                };
                LevelProgress {
                    level,
                    xp_into_level,
                    level_span: Some(span),
                    pct,
                }
            }
            None => LevelProgress {
                level,
                xp_into_level,
                level_span: None,
                pct: 100.0,
            },
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_LEVEL_THRESHOLDS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_levels() {
        let table = LevelTable::default();
        assert_eq!(table.level_for(0), 1);
        assert_eq!(table.level_for(99), 1);
        assert_eq!(table.level_for(100), 2);
        assert_eq!(table.level_for(249), 2);
        assert_eq!(table.level_for(250), 3);
    }

    #[test]
    fn multi_level_jump() {
        let table = LevelTable::default();
        assert_eq!(table.advance(1, 1200), 6);
    }

    #[test]
    fn capped_at_table_length() {
        let table = LevelTable::default();
        assert_eq!(table.level_for(10_000), 13);
        assert_eq!(table.level_for(u64::MAX), 13);
        assert_eq!(table.max_level(), 13);
    }

    #[test]
    fn advance_never_lowers() {
        let table = LevelTable::default();
        assert_eq!(table.advance(5, 0), 5);
    }

    #[test]
    fn progress_within_level() {
        let table = LevelTable::default();
        let p = table.progress(2, 175);
        assert_eq!(p.xp_into_level, 75);
        assert_eq!(p.level_span, Some(150));
        assert!((p.pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn progress_at_cap_is_full() {
        let table = LevelTable::default();
        let p = table.progress(13, 12_000);
        assert_eq!(p.level_span, None);
        assert_eq!(p.pct, 100.0);
    }
}
