mod driver;
mod engine;
mod schedule;

pub use driver::{TickDriver, TICK_PERIOD};
pub use engine::{format_clock, TimerEngine, Transition};
pub use schedule::{Phase, TimerConfig};
