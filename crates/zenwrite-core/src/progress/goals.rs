use serde::{Deserialize, Serialize};

/// Optional word and writing-time targets. Zero means "no goal".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    pub word_goal: u64,
    pub time_goal_minutes: u64,
}

impl Goals {
    /// Apply user input for the word goal. Non-numeric or negative input is
    /// ignored and the previous goal kept. Returns whether the goal changed.
    pub fn set_word_goal_from_input(&mut self, input: &str) -> bool {
        match parse_goal(input) {
            Some(goal) => {
                self.word_goal = goal;
                true
            }
            None => false,
        }
    }

    /// Same as [`Goals::set_word_goal_from_input`] for the time goal (minutes).
    pub fn set_time_goal_from_input(&mut self, input: &str) -> bool {
        match parse_goal(input) {
            Some(goal) => {
                self.time_goal_minutes = goal;
                true
            }
            None => false,
        }
    }

    pub fn word_progress_pct(&self, word_count: u64) -> f64 {
        ratio_pct(word_count, self.word_goal)
    }

    pub fn time_progress_pct(&self, writing_seconds: u64) -> f64 {
        ratio_pct(writing_seconds, self.time_goal_minutes.saturating_mul(60))
    }

    pub fn word_goal_met(&self, word_count: u64) -> bool {
        self.word_goal > 0 && word_count >= self.word_goal
    }
}

fn parse_goal(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok()
}

fn ratio_pct(value: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (value as f64 / goal as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_keeps_previous_goal() {
        let mut goals = Goals::default();
        assert!(goals.set_word_goal_from_input(" 500 "));
        assert!(!goals.set_word_goal_from_input("lots"));
        assert!(!goals.set_word_goal_from_input("-3"));
        assert_eq!(goals.word_goal, 500);
    }

    #[test]
    fn progress_is_capped() {
        let goals = Goals {
            word_goal: 200,
            time_goal_minutes: 1,
        };
        assert_eq!(goals.word_progress_pct(100), 50.0);
        assert_eq!(goals.word_progress_pct(900), 100.0);
        assert_eq!(goals.time_progress_pct(30), 50.0);
    }

    #[test]
    fn unset_goal_has_no_progress_and_is_never_met() {
        let goals = Goals::default();
        assert_eq!(goals.word_progress_pct(1000), 0.0);
        assert!(!goals.word_goal_met(1000));
    }
}
