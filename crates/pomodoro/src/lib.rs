//! pomodoro - Full-screen terminal pomodoro timer
//!
//! Counts down with a big block-digit clock, records each completed session
//! per day, and reports statistics over date ranges:
//! - Countdown engine with restart/quit prompt on expiry
//! - Daily session counts and minutes in a JSON file
//! - Statistics over all time, today, the last N days, or a date span

pub mod countdown;
pub mod duration;
pub mod error;
pub mod glyphs;
pub mod stats;
pub mod store;
pub mod terminal;

pub use countdown::{Countdown, Outcome};
pub use error::{PomodoroError, Result};
pub use stats::{StatsRange, StatsSummary};
pub use store::{DailyRecord, SessionLog, SessionStore};
