pub mod assist;
pub mod config;
pub mod progress;
pub mod session;
