//! The fixed badge catalog.

use serde::Serialize;

use crate::progress::Statistics;

/// Everything a badge predicate may look at.
///
/// Taken as an immutable snapshot after each state change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub stats: Statistics,
    /// Words added since the current work interval began.
    pub words_this_interval: u64,
    /// A work interval finished between midnight and 05:00 local time.
    pub night_session_completed: bool,
    /// Active word goal (0 = none).
    pub word_goal: u64,
}

/// A named, one-way predicate over [`ProgressSnapshot`].
#[derive(Clone, Copy, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    criteria: fn(&ProgressSnapshot) -> bool,
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Achievement {
    pub fn is_met(&self, snapshot: &ProgressSnapshot) -> bool {
        (self.criteria)(snapshot)
    }
}

pub const SPRINT_WORDS: u64 = 500;
pub const NIGHT_OWL_END_HOUR: u32 = 5;

fn first_words(s: &ProgressSnapshot) -> bool {
    s.stats.word_count >= 100
}
fn novelist_start(s: &ProgressSnapshot) -> bool {
    s.stats.word_count >= 1000
}
fn first_pomodoro(s: &ProgressSnapshot) -> bool {
    s.stats.pomodoros_this_session >= 1 || s.stats.pomodoros_total >= 1
}
fn pomodoro_pro(s: &ProgressSnapshot) -> bool {
    s.stats.pomodoros_this_session >= 5
}
fn zen_seeker(s: &ProgressSnapshot) -> bool {
    s.stats.zen_mode_activations >= 1
}
fn word_sprint(s: &ProgressSnapshot) -> bool {
    s.words_this_interval >= SPRINT_WORDS
}
fn daily_writer(s: &ProgressSnapshot) -> bool {
    s.stats.writing_seconds_today > 0
}
fn three_day_streak(s: &ProgressSnapshot) -> bool {
    s.stats.streak_days >= 3
}
fn night_owl(s: &ProgressSnapshot) -> bool {
    s.night_session_completed
}
fn word_goal_met(s: &ProgressSnapshot) -> bool {
    s.word_goal > 0 && s.stats.word_count >= s.word_goal
}
fn level_five(s: &ProgressSnapshot) -> bool {
    s.stats.level >= 5
}
fn level_ten(s: &ProgressSnapshot) -> bool {
    s.stats.level >= 10
}

pub static ACHIEVEMENTS: [Achievement; 12] = [
    Achievement {
        id: "first_words",
        name: "Word Weaver",
        description: "Wrote your first 100 words. Welcome!",
        criteria: first_words,
    },
    Achievement {
        id: "novelist_start",
        name: "Budding Author",
        description: "Reached 1,000 words. Keep it up!",
        criteria: novelist_start,
    },
    Achievement {
        id: "first_pomodoro",
        name: "Focus Initiate",
        description: "Completed your first Pomodoro session.",
        criteria: first_pomodoro,
    },
    Achievement {
        id: "pomodoro_pro",
        name: "Pomodoro Pro",
        description: "Completed 5 Pomodoro work sessions in one sitting.",
        criteria: pomodoro_pro,
    },
    Achievement {
        id: "zen_seeker",
        name: "Zen Seeker",
        description: "Used Zen Mode for a focused session.",
        criteria: zen_seeker,
    },
    Achievement {
        id: "word_sprint_500",
        name: "Sprint Star",
        description: "Wrote 500 words in a single Pomodoro.",
        criteria: word_sprint,
    },
    Achievement {
        id: "daily_writer",
        name: "Daily Dabbler",
        description: "Wrote something today!",
        criteria: daily_writer,
    },
    Achievement {
        id: "streak_3_days",
        name: "Consistent Quill",
        description: "Maintained a 3-day writing streak.",
        criteria: three_day_streak,
    },
    Achievement {
        id: "night_owl",
        name: "Night Owl",
        description: "Completed a writing session after midnight.",
        criteria: night_owl,
    },
    Achievement {
        id: "goal_getter_words",
        name: "Target Acquired",
        description: "Achieved a word count goal.",
        criteria: word_goal_met,
    },
    Achievement {
        id: "level_5_adept",
        name: "Adept Writer",
        description: "Reached Level 5! Your skills are growing.",
        criteria: level_five,
    },
    Achievement {
        id: "level_10_veteran",
        name: "Veteran Wordsmith",
        description: "Reached Level 10! Truly dedicated.",
        criteria: level_ten,
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn nothing_is_met_on_an_empty_session() {
        let snapshot = ProgressSnapshot::default();
        let met: Vec<_> = ACHIEVEMENTS.iter().filter(|a| a.is_met(&snapshot)).collect();
        assert!(met.is_empty(), "unexpected: {met:?}");
    }

    #[test]
    fn goal_badge_needs_a_goal() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.stats.word_count = 50;
        let badge = find("goal_getter_words").unwrap();
        assert!(!badge.is_met(&snapshot));
        snapshot.word_goal = 50;
        assert!(badge.is_met(&snapshot));
    }

    #[test]
    fn first_pomodoro_reads_either_counter() {
        let badge = find("first_pomodoro").unwrap();
        let mut snapshot = ProgressSnapshot::default();
        snapshot.stats.pomodoros_total = 1;
        assert!(badge.is_met(&snapshot));
    }
}
