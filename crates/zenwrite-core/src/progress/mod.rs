//! Experience points, levels, goals and the session counters they read.

mod goals;
mod level;
mod stats;
mod xp;

pub use goals::Goals;
pub use level::{LevelProgress, LevelTable, DEFAULT_LEVEL_THRESHOLDS};
pub use stats::{count_words, Statistics};
pub use xp::{XpRates, XpReason};
