use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Interval lengths for the work/break cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
    #[serde(default = "default_cycles_per_long_break")]
    pub cycles_per_long_break: u32,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    15
}
fn default_cycles_per_long_break() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_per_long_break: default_cycles_per_long_break(),
        }
    }
}

impl TimerConfig {
    /// Duration of `phase` in seconds.
    ///
    /// Uses saturating arithmetic so absurd minute values cannot overflow.
    pub fn duration_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };
        minutes.saturating_mul(60)
    }

    /// Phase that follows a completed work interval, given the new cycle count.
    pub fn break_after(&self, completed_work_cycles: u32) -> Phase {
        if completed_work_cycles % self.cycles_per_long_break.max(1) == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    /// Reject configurations the state machine cannot run.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cycles_per_long_break == 0 {
            return Err(ValidationError::InvalidValue {
                field: "timer.cycles_per_long_break".into(),
                message: "must be at least 1".into(),
            });
        }
        for (field, minutes) in [
            ("timer.work_minutes", self.work_minutes),
            ("timer.short_break_minutes", self.short_break_minutes),
            ("timer.long_break_minutes", self.long_break_minutes),
        ] {
            if minutes == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "must be at least 1 minute".into(),
                });
            }
        }
        Ok(())
    }
}
