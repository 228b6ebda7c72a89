//! # ZenWrite Core Library
//!
//! Business logic for ZenWrite, a focused-writing companion that pairs a
//! draft with a Pomodoro-style work/break timer, a small gamification layer
//! and a handful of model-backed writing tools. The CLI is a thin front-end
//! over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven work/break state machine plus an owned
//!   one-second tokio tick driver
//! - **Progress**: word counting, XP rates, the level table and goals
//! - **Badges**: a static achievement catalog and the grow-only unlock set
//! - **Session**: the state container that wires the above together and
//!   reports every change as [`Event`]s
//! - **Assist**: five writing tools over a [`PromptService`], never failing
//!   past their fallbacks
//! - **Storage**: TOML configuration
//!
//! ## Key Components
//!
//! - [`WritingSession`]: the session state container
//! - [`TimerEngine`]: core timer state machine
//! - [`Assistant`]: the writing tools
//! - [`Config`]: application configuration management

pub mod assist;
pub mod badges;
pub mod error;
pub mod events;
pub mod progress;
pub mod session;
pub mod settings;
pub mod storage;
pub mod timer;

pub use assist::{Assistant, HttpPromptService, OutcomeSource, PromptService, Ticket, ToolOutcome};
pub use badges::{AchievementBook, ACHIEVEMENTS};
pub use error::{AssistError, ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use progress::{LevelTable, Statistics, XpRates};
pub use session::WritingSession;
pub use settings::FocusSettings;
pub use storage::Config;
pub use timer::{Phase, TickDriver, TimerConfig, TimerEngine};
