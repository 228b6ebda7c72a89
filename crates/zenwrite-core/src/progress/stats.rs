use serde::{Deserialize, Serialize};

/// Running counters for one writing session.
///
/// Everything is in-memory; `pomodoros_total` is the lifetime counter that
/// survives a timer reset, `pomodoros_this_session` is the same count but is
/// what the session-scoped badges read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub word_count: u64,
    pub pomodoros_this_session: u64,
    pub pomodoros_total: u64,
    pub writing_seconds_today: u64,
    pub zen_mode_activations: u64,
    pub streak_days: u32,
    pub experience_points: u64,
    pub level: u32,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            word_count: 0,
            pomodoros_this_session: 0,
            pomodoros_total: 0,
            writing_seconds_today: 0,
            zen_mode_activations: 0,
            streak_days: 0,
            experience_points: 0,
            level: 1,
        }
    }
}

/// Whitespace-delimited, non-empty tokens.
pub fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tokens_between_any_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  two\twords \n"), 2);
        assert_eq!(count_words("hyphen-ated isn't split"), 3);
    }

    #[test]
    fn starts_at_level_one() {
        assert_eq!(Statistics::default().level, 1);
    }
}
