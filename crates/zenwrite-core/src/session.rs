//! One writing session: timer, text, progression and badges in a single
//! explicit state container.
//!
//! Every mutating method returns the [`Event`]s it produced, in order:
//! the change itself, any XP award, level-ups, then newly unlocked badges.
//! Badges are evaluated after every change, so callers never have to.

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};
use uuid::Uuid;

use crate::assist::{ExerciseRequest, RequestTickets, Ticket, ToolOutcome};
use crate::badges::{AchievementBook, ProgressSnapshot, NIGHT_OWL_END_HOUR};
use crate::events::Event;
use crate::progress::{count_words, Goals, LevelProgress, LevelTable, Statistics, XpRates, XpReason};
use crate::settings::FocusSettings;
use crate::storage::Config;
use crate::timer::{Phase, TimerConfig, TimerEngine, Transition};

#[derive(Debug, Clone)]
pub struct WritingSession {
    id: Uuid,
    timer: TimerEngine,
    stats: Statistics,
    levels: LevelTable,
    rates: XpRates,
    badges: AchievementBook,
    settings: FocusSettings,
    goals: Goals,
    text: String,
    words_this_interval: u64,
    night_session_completed: bool,
    last_writing_day: Option<NaiveDate>,
    zen_mode: bool,
    tickets: RequestTickets,
}

impl WritingSession {
    pub fn new(timer: TimerConfig, rates: XpRates, settings: FocusSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            timer: TimerEngine::new(timer),
            stats: Statistics::default(),
            levels: LevelTable::default(),
            rates,
            badges: AchievementBook::new(),
            settings,
            goals: Goals::default(),
            text: String::new(),
            words_this_interval: 0,
            night_session_completed: false,
            last_writing_day: None,
            zen_mode: false,
            tickets: RequestTickets::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timer.clone(), config.xp.clone(), config.focus)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn badges(&self) -> &AchievementBook {
        &self.badges
    }

    pub fn settings(&self) -> &FocusSettings {
        &self.settings
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.levels.progress(self.stats.level, self.stats.experience_points)
    }

    pub fn words_this_interval(&self) -> u64 {
        self.words_this_interval
    }

    pub fn in_zen_mode(&self) -> bool {
        self.zen_mode
    }

    /// The editor is locked while a break counts down.
    pub fn is_writing_disabled(&self) -> bool {
        self.timer.is_running() && self.timer.phase().is_break()
    }

    pub fn deep_work_active(&self) -> bool {
        self.settings.deep_work_mode && self.timer.is_running() && self.timer.phase() == Phase::Work
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stats: self.stats.clone(),
            words_this_interval: self.words_this_interval,
            night_session_completed: self.night_session_completed,
            word_goal: self.goals.word_goal,
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<Event> {
        self.timer.start().into_iter().collect()
    }

    pub fn pause(&mut self) -> Vec<Event> {
        self.timer.pause().into_iter().collect()
    }

    /// Timer back to its initial state. Statistics, XP and badges stay.
    pub fn reset(&mut self) -> Vec<Event> {
        self.words_this_interval = 0;
        vec![self.timer.reset()]
    }

    pub fn skip(&mut self) -> Vec<Event> {
        self.skip_at(Local::now())
    }

    pub fn skip_at(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let transition = self.timer.skip();
        let mut events = Vec::new();
        self.on_transition(transition, now, &mut events);
        self.settle(&mut events);
        events
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(Local::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let mut events = Vec::new();
        let was_writing = self.timer.is_running() && self.timer.phase() == Phase::Work;
        if was_writing {
            self.accrue_writing_second(now.date_naive(), &mut events);
        }
        if let Some(transition) = self.timer.tick() {
            self.on_transition(transition, now, &mut events);
        }
        if was_writing || !events.is_empty() {
            self.settle(&mut events);
        }
        events
    }

    /// Replace interval lengths. Held by the timer until the next reset, so
    /// the current phase and any skip before then keep the old lengths.
    pub fn set_timer_config(&mut self, config: TimerConfig) {
        self.timer.set_config(config);
    }

    // ── Writing ──────────────────────────────────────────────────────

    /// Replace the draft and award XP for newly written words.
    pub fn update_text(&mut self, text: impl Into<String>) -> Vec<Event> {
        self.text = text.into();
        let previous = self.stats.word_count;
        let current = count_words(&self.text);
        let mut events = Vec::new();

        if self.timer.phase() == Phase::Work {
            self.words_this_interval += current.saturating_sub(previous);
        }
        self.stats.word_count = current;
        let xp = self.rates.for_words(previous, current);
        self.award(xp, XpReason::Words, &mut events);
        self.settle(&mut events);
        events
    }

    pub fn append_text(&mut self, more: &str) -> Vec<Event> {
        let mut text = std::mem::take(&mut self.text);
        if !text.is_empty() && !text.ends_with(char::is_whitespace) {
            text.push(' ');
        }
        text.push_str(more);
        self.update_text(text)
    }

    pub fn enter_zen_mode(&mut self) -> Vec<Event> {
        if self.zen_mode {
            return Vec::new();
        }
        self.zen_mode = true;
        self.stats.zen_mode_activations += 1;
        let mut events = vec![Event::ZenModeEntered {
            activations: self.stats.zen_mode_activations,
            at: Utc::now(),
        }];
        self.settle(&mut events);
        events
    }

    pub fn exit_zen_mode(&mut self) {
        self.zen_mode = false;
    }

    // ── Settings & goals ─────────────────────────────────────────────

    pub fn settings_mut(&mut self) -> &mut FocusSettings {
        &mut self.settings
    }

    /// Invalid input leaves the previous goal in place.
    pub fn set_word_goal(&mut self, input: &str) -> Vec<Event> {
        let mut events = Vec::new();
        if self.goals.set_word_goal_from_input(input) {
            self.settle(&mut events);
        }
        events
    }

    pub fn set_time_goal(&mut self, input: &str) -> bool {
        self.goals.set_time_goal_from_input(input)
    }

    // ── Assistant ────────────────────────────────────────────────────

    /// Register an outgoing tool request; any earlier one becomes stale.
    pub fn begin_tool_request(&mut self) -> Ticket {
        self.tickets.issue()
    }

    /// Apply a tool result. Returns `None` when the ticket was superseded,
    /// in which case the outcome is dropped without XP.
    pub fn finish_tool_request<T>(&mut self, ticket: Ticket, outcome: &ToolOutcome<T>) -> Option<Vec<Event>> {
        if !self.tickets.is_current(ticket) {
            tracing::debug!(ticket = ticket.id(), tool = ?outcome.tool, "dropping stale tool response");
            return None;
        }
        self.tickets.invalidate();
        let mut events = Vec::new();
        if outcome.earns_xp() {
            self.award(self.rates.per_tool_use, XpReason::ToolUse, &mut events);
        }
        self.settle(&mut events);
        Some(events)
    }

    /// Exercise context, offered only during a break with exercises enabled.
    pub fn exercise_request(&self) -> Option<ExerciseRequest> {
        if self.timer.phase().is_break() && self.settings.exercises_enabled() {
            Some(ExerciseRequest::from_text(&self.text))
        } else {
            None
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn accrue_writing_second(&mut self, today: NaiveDate, events: &mut Vec<Event>) {
        if self.last_writing_day != Some(today) {
            let consecutive = self.last_writing_day.is_some() && self.last_writing_day == today.pred_opt();
            self.stats.writing_seconds_today = 0;
            self.stats.streak_days = if consecutive {
                self.stats.streak_days.saturating_add(1)
            } else {
                1
            };
            self.last_writing_day = Some(today);
            events.push(Event::StreakUpdated {
                streak_days: self.stats.streak_days,
                at: Utc::now(),
            });
        }
        self.stats.writing_seconds_today += 1;
    }

    fn on_transition(&mut self, transition: Transition, now: DateTime<Local>, events: &mut Vec<Event>) {
        events.push(transition.to_event());
        if transition.completed_work() {
            self.stats.pomodoros_this_session += 1;
            self.stats.pomodoros_total += 1;
            if now.hour() < NIGHT_OWL_END_HOUR {
                self.night_session_completed = true;
            }
            self.award(self.rates.per_completion, XpReason::IntervalCompleted, events);
        }
        if transition.to == Phase::Work {
            self.words_this_interval = 0;
        }
    }

    fn award(&mut self, amount: u64, reason: XpReason, events: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }
        self.stats.experience_points = self.stats.experience_points.saturating_add(amount);
        events.push(Event::XpAwarded {
            amount,
            reason,
            total: self.stats.experience_points,
            at: Utc::now(),
        });

        let reached = self.levels.advance(self.stats.level, self.stats.experience_points);
        for level in (self.stats.level + 1)..=reached {
            tracing::info!(level, "level up");
            events.push(Event::LevelUp { level, at: Utc::now() });
        }
        self.stats.level = reached;
    }

    fn settle(&mut self, events: &mut Vec<Event>) {
        let snapshot = self.snapshot();
        events.extend(self.badges.update(&snapshot));
    }
}

impl Default for WritingSession {
    fn default() -> Self {
        Self::new(TimerConfig::default(), XpRates::default(), FocusSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    fn short_timer() -> TimerConfig {
        TimerConfig {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 1,
            cycles_per_long_break: 4,
        }
    }

    fn unlocked(events: &[Event]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::AchievementUnlocked { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn words_award_xp_and_badges() {
        let mut session = WritingSession::default();
        let text = "word ".repeat(120);
        let events = session.update_text(text);
        assert_eq!(session.stats().word_count, 120);
        assert_eq!(session.stats().experience_points, 12);
        assert_eq!(unlocked(&events), vec!["first_words".to_string()]);
    }

    #[test]
    fn deleting_text_keeps_xp() {
        let mut session = WritingSession::default();
        session.update_text("one two three four five six seven eight nine ten eleven");
        let xp = session.stats().experience_points;
        session.update_text("one");
        assert_eq!(session.stats().experience_points, xp);
        assert_eq!(session.stats().word_count, 1);
    }

    #[test]
    fn skip_of_work_counts_as_completion() {
        let mut session = WritingSession::default();
        let events = session.skip_at(at(2026, 3, 2, 14));
        assert_eq!(session.stats().pomodoros_total, 1);
        assert_eq!(session.stats().experience_points, 50);
        assert_eq!(session.timer().phase(), Phase::ShortBreak);
        assert!(session.timer().is_running());
        assert!(unlocked(&events).contains(&"first_pomodoro".to_string()));
    }

    #[test]
    fn night_completion_unlocks_night_owl() {
        let mut session = WritingSession::default();
        let events = session.skip_at(at(2026, 3, 2, 2));
        assert!(unlocked(&events).contains(&"night_owl".to_string()));

        let mut day = WritingSession::default();
        day.skip_at(at(2026, 3, 2, 9));
        assert!(!day.badges().is_achieved("night_owl"));
    }

    #[test]
    fn level_ups_are_reported_one_by_one() {
        let mut session = WritingSession::new(
            TimerConfig::default(),
            XpRates {
                per_word: 1.0,
                ..XpRates::default()
            },
            FocusSettings::default(),
        );
        let events = session.update_text("w ".repeat(260));
        let levels: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::LevelUp { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3]);
        assert_eq!(session.stats().level, 3);
    }

    #[test]
    fn writing_time_only_counts_running_work() {
        let mut session = WritingSession::new(short_timer(), XpRates::default(), FocusSettings::default());
        let now = at(2026, 3, 2, 10);
        session.tick_at(now);
        assert_eq!(session.stats().writing_seconds_today, 0);

        session.start();
        let events = session.tick_at(now);
        assert_eq!(session.stats().writing_seconds_today, 1);
        assert_eq!(session.stats().streak_days, 1);
        assert!(unlocked(&events).contains(&"daily_writer".to_string()));

        for _ in 0..59 {
            session.tick_at(now);
        }
        assert_eq!(session.timer().phase(), Phase::ShortBreak);
        let before = session.stats().writing_seconds_today;
        session.tick_at(now);
        assert_eq!(session.stats().writing_seconds_today, before);
        assert!(session.is_writing_disabled());
    }

    #[test]
    fn streak_follows_consecutive_days() {
        let mut session = WritingSession::default();
        session.start();
        session.tick_at(at(2026, 3, 1, 10));
        session.tick_at(at(2026, 3, 2, 10));
        session.tick_at(at(2026, 3, 3, 10));
        assert_eq!(session.stats().streak_days, 3);
        assert_eq!(session.stats().writing_seconds_today, 1);
        assert!(session.badges().is_achieved("streak_3_days"));

        session.tick_at(at(2026, 3, 5, 10));
        assert_eq!(session.stats().streak_days, 1);
    }

    #[test]
    fn reset_keeps_lifetime_stats() {
        let mut session = WritingSession::default();
        session.skip_at(at(2026, 3, 2, 12));
        session.reset();
        assert_eq!(session.timer().phase(), Phase::Work);
        assert!(!session.timer().is_running());
        assert_eq!(session.timer().completed_work_cycles(), 0);
        assert_eq!(session.stats().pomodoros_total, 1);
        assert_eq!(session.stats().experience_points, 50);
    }

    #[test]
    fn stale_tool_responses_are_dropped() {
        use crate::assist::{OutcomeSource, StuckActivity, ToolKind};

        let outcome = ToolOutcome {
            tool: ToolKind::StuckActivity,
            source: OutcomeSource::Model,
            output: StuckActivity {
                activity_suggestion: "Walk".into(),
                rationale: None,
                estimated_time: None,
            },
        };
        let mut session = WritingSession::default();
        let old = session.begin_tool_request();
        let new = session.begin_tool_request();
        assert!(session.finish_tool_request(old, &outcome).is_none());
        assert!(session.finish_tool_request(new, &outcome).is_some());
        assert_eq!(session.stats().experience_points, 20);
        assert!(session.finish_tool_request(new, &outcome).is_none());
    }

    #[test]
    fn timer_config_applies_on_reset() {
        let mut session = WritingSession::default();
        session.start();
        for _ in 0..60 {
            session.tick_at(at(2026, 3, 2, 10));
        }
        session.set_timer_config(short_timer());
        assert_eq!(session.timer().seconds_remaining(), 24 * 60);
        assert!(session.timer().phase_progress_pct() < 5.0);

        session.skip_at(at(2026, 3, 2, 10));
        assert_eq!(session.timer().phase(), Phase::ShortBreak);
        assert_eq!(session.timer().seconds_remaining(), 5 * 60);

        session.reset();
        assert_eq!(session.timer().seconds_remaining(), short_timer().duration_secs(Phase::Work));
    }

    #[test]
    fn reset_keeps_in_flight_tool_request() {
        use crate::assist::{OutcomeSource, StuckActivity, ToolKind};

        let outcome = ToolOutcome {
            tool: ToolKind::StuckActivity,
            source: OutcomeSource::Model,
            output: StuckActivity {
                activity_suggestion: "Stretch".into(),
                rationale: None,
                estimated_time: None,
            },
        };
        let mut session = WritingSession::default();
        session.start();
        let ticket = session.begin_tool_request();
        session.reset();
        assert!(session.finish_tool_request(ticket, &outcome).is_some());
        assert_eq!(session.stats().experience_points, 20);
    }

    #[test]
    fn fallback_outcomes_earn_nothing() {
        use crate::assist::{BreakPointSuggestion, OutcomeSource, ToolKind};

        let mut session = WritingSession::default();
        let ticket = session.begin_tool_request();
        let outcome = ToolOutcome {
            tool: ToolKind::BreakPoint,
            source: OutcomeSource::Local,
            output: BreakPointSuggestion {
                is_good_break_point: false,
                reason: "short".into(),
                suggested_action: None,
            },
        };
        let events = session.finish_tool_request(ticket, &outcome).unwrap();
        assert!(events.is_empty());
        assert_eq!(session.stats().experience_points, 0);
    }

    #[test]
    fn exercise_request_only_in_breaks() {
        let mut session = WritingSession::default();
        session.update_text("A story about the sea");
        assert!(session.exercise_request().is_none());

        session.skip_at(at(2026, 3, 2, 12));
        let request = session.exercise_request().unwrap();
        assert_eq!(request.current_topic.as_deref(), Some("A story about the sea"));
        assert_eq!(request.text_length, Some(21));

        session.settings_mut().content_aware_breaks = false;
        assert!(session.exercise_request().is_none());
    }

    #[test]
    fn sprint_counts_words_within_one_interval() {
        let mut session = WritingSession::default();
        session.update_text("w ".repeat(300));
        session.skip_at(at(2026, 3, 2, 12));
        session.skip_at(at(2026, 3, 2, 12));
        assert_eq!(session.words_this_interval(), 0);
        let events = session.update_text("w ".repeat(800));
        assert!(unlocked(&events).contains(&"word_sprint_500".to_string()));
    }

    #[test]
    fn zen_mode_counts_entries() {
        let mut session = WritingSession::default();
        let events = session.enter_zen_mode();
        assert!(matches!(events[0], Event::ZenModeEntered { activations: 1, .. }));
        assert!(session.enter_zen_mode().is_empty());
        session.exit_zen_mode();
        session.enter_zen_mode();
        assert_eq!(session.stats().zen_mode_activations, 2);
        assert!(session.badges().is_achieved("zen_seeker"));
    }

    #[test]
    fn word_goal_badge() {
        let mut session = WritingSession::default();
        session.update_text("w ".repeat(50));
        assert!(session.set_word_goal("nope").is_empty());
        let events = session.set_word_goal("40");
        assert!(unlocked(&events).contains(&"goal_getter_words".to_string()));
    }

    #[test]
    fn deep_work_needs_running_work_phase() {
        let mut session = WritingSession::default();
        session.settings_mut().deep_work_mode = true;
        assert!(!session.deep_work_active());
        session.start();
        assert!(session.deep_work_active());
    }
}
