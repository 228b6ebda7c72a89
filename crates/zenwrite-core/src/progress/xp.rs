use serde::{Deserialize, Serialize};

/// Why XP was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpReason {
    Words,
    IntervalCompleted,
    ToolUse,
}

/// XP award rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpRates {
    /// XP per newly written word; fractions are floored per update.
    #[serde(default = "default_per_word")]
    pub per_word: f64,
    #[serde(default = "default_per_completion")]
    pub per_completion: u64,
    #[serde(default = "default_per_tool_use")]
    pub per_tool_use: u64,
}

fn default_per_word() -> f64 {
    0.1
}
fn default_per_completion() -> u64 {
    50
}
fn default_per_tool_use() -> u64 {
    20
}

impl Default for XpRates {
    fn default() -> Self {
        Self {
            per_word: default_per_word(),
            per_completion: default_per_completion(),
            per_tool_use: default_per_tool_use(),
        }
    }
}

impl XpRates {
    /// XP for moving from `previous` to `current` words. Deletions earn nothing.
    pub fn for_words(&self, previous: u64, current: u64) -> u64 {
        let written = current.saturating_sub(previous);
        if written == 0 || !self.per_word.is_finite() || self.per_word <= 0.0 {
            return 0;
        }
        (written as f64 * self.per_word).floor() as u64
    }
}
