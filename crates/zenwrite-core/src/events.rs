use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::XpReason;
use crate::timer::Phase;

/// Every state change in a writing session produces an Event.
/// Front-ends render them as notifications; nothing else consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ended, either by running out or by a skip.
    IntervalCompleted {
        from: Phase,
        to: Phase,
        completed_work_cycles: u32,
        skipped: bool,
        at: DateTime<Utc>,
    },
    XpAwarded {
        amount: u64,
        reason: XpReason,
        total: u64,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u32,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        id: String,
        name: String,
        description: String,
        at: DateTime<Utc>,
    },
    ZenModeEntered {
        activations: u64,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        streak_days: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        phase: Phase,
        seconds_remaining: u64,
        total_secs: u64,
        completed_work_cycles: u32,
        phase_progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// One-line human message, the terminal equivalent of a toast.
    pub fn message(&self) -> Option<String> {
        match self {
            Event::IntervalCompleted { to, .. } => Some(match to {
                Phase::LongBreak => "Long Break Time! Great job, step away for a while.".into(),
                Phase::ShortBreak => "Short Break! Nice focus, enjoy a breather.".into(),
                Phase::Work => "Back to Work! Time to focus and write.".into(),
            }),
            Event::LevelUp { level, .. } => {
                Some(format!("Level Up! You've reached Level {level}!"))
            }
            Event::AchievementUnlocked { name, .. } => {
                Some(format!("Achievement Unlocked! You earned the \"{name}\" badge!"))
            }
            Event::StreakUpdated { streak_days, .. } if *streak_days > 1 => {
                Some(format!("{streak_days}-day writing streak!"))
            }
            _ => None,
        }
    }
}
