//! Session statistics calculation
//!
//! Aggregates daily records over a date range into:
//! - Total sessions and minutes
//! - Active days (days with at least one session)
//! - Average sessions per active day

use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::error::{PomodoroError, Result};
use crate::store::SessionLog;

/// Which dates a stats query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    /// Every persisted record
    AllTime,
    /// Exactly today
    Today,
    /// `[today - (n-1), today]`, n >= 1
    LastNDays(u32),
    /// `[start, end]`, inclusive
    DateSpan(NaiveDate, NaiveDate),
}

impl StatsRange {
    /// Build a date span, rejecting `start > end`
    pub fn date_span(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(PomodoroError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(StatsRange::DateSpan(start, end))
    }

    /// Parse a range token: `all`, `today`, `week`, `month`, a day count,
    /// or `YYYY-MM-DD:YYYY-MM-DD`
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        match token.to_lowercase().as_str() {
            "" | "all" => return Ok(StatsRange::AllTime),
            "today" => return Ok(StatsRange::Today),
            "week" => return Ok(StatsRange::LastNDays(7)),
            "month" => return Ok(StatsRange::LastNDays(30)),
            _ => {}
        }

        if let Some((start, end)) = token.split_once(':') {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            return Self::date_span(start, end);
        }

        match token.parse::<u32>() {
            Ok(days) if days > 0 => Ok(StatsRange::LastNDays(days)),
            _ => Err(PomodoroError::InvalidRange(format!(
                "'{}' (expected all, today, week, month, a number of days, or START:END)",
                token
            ))),
        }
    }

    /// Inclusive date bounds relative to `today`; `None` means unbounded
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            StatsRange::AllTime => None,
            StatsRange::Today => Some((today, today)),
            StatsRange::LastNDays(n) => {
                let back = i64::from(n.max(1)) - 1;
                let start = today
                    .checked_sub_signed(Duration::days(back))
                    .unwrap_or(NaiveDate::MIN);
                Some((start, today))
            }
            StatsRange::DateSpan(start, end) => Some((start, end)),
        }
    }

    fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.bounds(today) {
            None => true,
            Some((start, end)) => start <= date && date <= end,
        }
    }
}

impl fmt::Display for StatsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsRange::AllTime => write!(f, "All time"),
            StatsRange::Today => write!(f, "Today"),
            StatsRange::LastNDays(n) => write!(f, "Last {} days", n),
            StatsRange::DateSpan(start, end) => write!(f, "{} to {}", start, end),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| PomodoroError::InvalidRange(format!("bad date '{}': {}", s.trim(), e)))
}

/// Aggregated session statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    /// Sum of session counts
    pub total_sessions: u32,
    /// Sum of credited minutes
    pub total_minutes: u32,
    /// Dates with at least one session
    pub days_active: u32,
    /// `total_sessions / days_active`, 0 when nothing is active
    pub average_per_active_day: f64,
}

impl StatsSummary {
    /// Calculate statistics for the records of `log` that fall in `range`
    pub fn from_log(log: &SessionLog, range: StatsRange, today: NaiveDate) -> Self {
        let mut summary = Self::default();

        for (date, record) in log.records() {
            if !range.contains(*date, today) {
                continue;
            }
            summary.total_sessions = summary.total_sessions.saturating_add(record.count);
            summary.total_minutes = summary.total_minutes.saturating_add(record.total_minutes);
            if record.count > 0 {
                summary.days_active += 1;
            }
        }

        if summary.days_active > 0 {
            summary.average_per_active_day =
                f64::from(summary.total_sessions) / f64::from(summary.days_active);
        }

        summary
    }

    /// Get total hours and minutes as a tuple
    pub fn total_time(&self) -> (u32, u32) {
        let hours = self.total_minutes / 60;
        let mins = self.total_minutes % 60;
        (hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn log_with(entries: &[(&str, u32, u32)]) -> SessionLog {
        let mut log = SessionLog::default();
        for &(day, count, minutes) in entries {
            for _ in 0..count {
                log.record(date(day), minutes / count.max(1));
            }
        }
        log
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(StatsRange::parse("").unwrap(), StatsRange::AllTime);
        assert_eq!(StatsRange::parse("all").unwrap(), StatsRange::AllTime);
        assert_eq!(StatsRange::parse("Today").unwrap(), StatsRange::Today);
        assert_eq!(StatsRange::parse("week").unwrap(), StatsRange::LastNDays(7));
        assert_eq!(StatsRange::parse("month").unwrap(), StatsRange::LastNDays(30));
        assert_eq!(StatsRange::parse("14").unwrap(), StatsRange::LastNDays(14));
    }

    #[test]
    fn test_parse_span() {
        assert_eq!(
            StatsRange::parse("2025-01-01:2025-01-31").unwrap(),
            StatsRange::DateSpan(date("2025-01-01"), date("2025-01-31"))
        );
    }

    #[test]
    fn test_parse_rejects_reversed_span() {
        assert!(matches!(
            StatsRange::parse("2025-02-01:2025-01-01"),
            Err(PomodoroError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        for token in ["yesterday", "0", "-3", "2025-13-01:2025-12-31", "2025-01-01:", "2025-02-30:2025-03-01"] {
            assert!(
                matches!(StatsRange::parse(token), Err(PomodoroError::InvalidRange(_))),
                "expected '{}' to be rejected",
                token
            );
        }
    }

    #[test]
    fn test_last_n_days_bounds() {
        let today = date("2025-03-10");
        assert_eq!(
            StatsRange::LastNDays(7).bounds(today),
            Some((date("2025-03-04"), today))
        );
        assert_eq!(StatsRange::LastNDays(1).bounds(today), Some((today, today)));
        assert_eq!(StatsRange::AllTime.bounds(today), None);
    }

    #[test]
    fn test_empty_stats() {
        let stats = StatsSummary::from_log(&SessionLog::default(), StatsRange::AllTime, date("2025-01-01"));
        assert_eq!(stats, StatsSummary::default());
        assert_eq!(stats.average_per_active_day, 0.0);
    }

    #[test]
    fn test_stats_calculation() {
        let log = log_with(&[
            ("2025-03-01", 4, 100),
            ("2025-03-05", 2, 50),
            ("2025-03-09", 0, 0),
            ("2025-03-10", 3, 75),
        ]);
        let today = date("2025-03-10");

        let all = StatsSummary::from_log(&log, StatsRange::AllTime, today);
        assert_eq!(all.total_sessions, 9);
        assert_eq!(all.total_minutes, 225);
        assert_eq!(all.days_active, 3);
        assert_eq!(all.average_per_active_day, 3.0);

        let week = StatsSummary::from_log(&log, StatsRange::LastNDays(7), today);
        assert_eq!(week.total_sessions, 5);
        assert_eq!(week.days_active, 2);
        assert_eq!(week.average_per_active_day, 2.5);
    }

    #[test]
    fn test_reset_day_is_not_active() {
        let mut log = log_with(&[("2025-03-10", 2, 50)]);
        log.reset(date("2025-03-10"));

        let stats = StatsSummary::from_log(&log, StatsRange::AllTime, date("2025-03-10"));
        assert_eq!(stats, StatsSummary::default());
    }

    #[test]
    fn test_single_day_span_matches_today() {
        let log = log_with(&[("2025-03-09", 1, 25), ("2025-03-10", 2, 50)]);
        let today = date("2025-03-10");

        let span = StatsRange::date_span(today, today).unwrap();
        assert_eq!(
            StatsSummary::from_log(&log, span, today),
            StatsSummary::from_log(&log, StatsRange::Today, today)
        );
    }

    #[test]
    fn test_span_without_data_is_zero() {
        let log = log_with(&[("2025-03-10", 2, 50)]);
        let span = StatsRange::parse("2025-01-01:2025-01-31").unwrap();

        let stats = StatsSummary::from_log(&log, span, date("2025-03-10"));
        assert_eq!(stats, StatsSummary::default());
    }

    #[test]
    fn test_total_time() {
        let log = log_with(&[("2025-03-10", 3, 135)]);
        let stats = StatsSummary::from_log(&log, StatsRange::Today, date("2025-03-10"));
        assert_eq!(stats.total_time(), (2, 15));
    }
}
