//! Work/break timer state machine.
//!
//! The engine does not own a clock. The caller feeds it one `tick()` per
//! elapsed second (see [`super::TickDriver`]); the tick that drains the
//! remaining seconds also performs the phase hand-off, so a depletion can
//! never be observed twice.
//!
//! ## Cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ShortBreak -> Work -> ShortBreak -> Work -> LongBreak -> Work ...
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::default());
//! engine.start();
//! // once per second:
//! if let Some(transition) = engine.tick() { /* award, notify */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::schedule::{Phase, TimerConfig};
use crate::events::Event;

/// Result of a phase ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Cycle count after the transition.
    pub completed_work_cycles: u32,
    pub skipped: bool,
}

impl Transition {
    /// Whether this transition finished a work interval.
    pub fn completed_work(&self) -> bool {
        self.from == Phase::Work
    }

    pub fn to_event(&self) -> Event {
        Event::IntervalCompleted {
            from: self.from,
            to: self.to,
            completed_work_cycles: self.completed_work_cycles,
            skipped: self.skipped,
            at: Utc::now(),
        }
    }
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    /// Lengths waiting for the next reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pending_config: Option<TimerConfig>,
    running: bool,
    seconds_remaining: u64,
    phase: Phase,
    completed_work_cycles: u32,
}

impl TimerEngine {
    /// Create an idle engine at the start of a work interval.
    pub fn new(config: TimerConfig) -> Self {
        let seconds_remaining = config.duration_secs(Phase::Work);
        Self {
            config,
            pending_config: None,
            running: false,
            seconds_remaining,
            phase: Phase::Work,
            completed_work_cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn total_secs(&self) -> u64 {
        self.config.duration_secs(self.phase)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn phase_progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.seconds_remaining);
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// `mm:ss` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_clock(self.seconds_remaining)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.running,
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            total_secs: self.total_secs(),
            completed_work_cycles: self.completed_work_cycles,
            phase_progress_pct: self.phase_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Back to the initial state. Cycle progress is discarded and a pending
    /// config from [`TimerEngine::set_config`] becomes the active one.
    pub fn reset(&mut self) -> Event {
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
        self.running = false;
        self.phase = Phase::Work;
        self.completed_work_cycles = 0;
        self.seconds_remaining = self.config.duration_secs(Phase::Work);
        Event::TimerReset { at: Utc::now() }
    }

    /// End the current phase immediately.
    pub fn skip(&mut self) -> Transition {
        self.complete_interval(true)
    }

    /// Advance one second. Returns the transition when this tick drains the phase.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.running {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            return Some(self.complete_interval(false));
        }
        None
    }

    /// Replace the interval lengths. Takes effect from the next reset; until
    /// then the current phase and later transitions use the old lengths.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.pending_config = Some(config);
    }

    pub fn pending_config(&self) -> Option<&TimerConfig> {
        self.pending_config.as_ref()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_interval(&mut self, skipped: bool) -> Transition {
        let from = self.phase;
        let to = match from {
            Phase::Work => {
                self.completed_work_cycles = self.completed_work_cycles.saturating_add(1);
                self.config.break_after(self.completed_work_cycles)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = to;
        // Installed before returning so a following tick counts down the new phase.
        self.seconds_remaining = self.config.duration_secs(to);
        self.running = true;
        tracing::debug!(?from, ?to, cycles = self.completed_work_cycles, skipped, "interval complete");
        Transition {
            from,
            to,
            completed_work_cycles: self.completed_work_cycles,
            skipped,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

/// Format seconds as `mm:ss`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
