//! Pomodoro Core - Shared functionality for the pomodoro timer
//!
//! Standard paths, the optional config file, and the formatting helpers
//! used by both the countdown screen and the statistics report.

pub mod config;
pub mod format;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
