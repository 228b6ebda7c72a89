//! Badges: a static catalog of predicates and the monotonic set of unlocks.

mod book;
mod catalog;

pub use book::{evaluate, AchievementBook, BadgeStatus};
pub use catalog::{find, Achievement, ProgressSnapshot, ACHIEVEMENTS, NIGHT_OWL_END_HOUR, SPRINT_WORDS};
