//! Timer duration parsing
//!
//! Accepts a bare number of minutes (`25`) or a sequence of `<number><unit>`
//! tokens (`1h30m`, `1 hour 30 minutes`, `90s`). Tokens may be separated by
//! whitespace, commas, or the word "and".

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{PomodoroError, Result};

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"(\d+)\s*([a-z]*)").unwrap())
}

fn unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(3600),
        // A bare number counts as minutes
        "" | "m" | "min" | "mins" | "minute" | "minutes" => Some(60),
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1),
        _ => None,
    }
}

fn is_separator(gap: &str) -> bool {
    gap.split(|c: char| c.is_whitespace() || c == ',')
        .all(|word| word.is_empty() || word == "and")
}

/// Parse a duration string into a positive `Duration`
pub fn parse(input: &str) -> Result<Duration> {
    let text = input.trim().to_lowercase();
    let invalid = || PomodoroError::InvalidDuration(format!("'{}'", input.trim()));

    if text.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    let mut last_end = 0;

    for caps in token_pattern().captures_iter(&text) {
        let whole = caps.get(0).ok_or_else(invalid)?;
        if !is_separator(&text[last_end..whole.start()]) {
            return Err(invalid());
        }
        last_end = whole.end();

        let value: u64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = unit_seconds(&caps[2]).ok_or_else(|| {
            PomodoroError::InvalidDuration(format!(
                "unknown unit '{}' in '{}'",
                &caps[2],
                input.trim()
            ))
        })?;

        total = value
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| PomodoroError::InvalidDuration(format!("'{}' is too long", input.trim())))?;
    }

    if last_end == 0 || !is_separator(&text[last_end..]) {
        return Err(invalid());
    }

    if total == 0 {
        return Err(PomodoroError::InvalidDuration(
            "duration must be greater than zero".to_string(),
        ));
    }

    Ok(Duration::from_secs(total))
}

/// Minutes a completed session is credited with: nearest whole minute
/// (halves round up), never less than one.
pub fn credited_minutes(total_seconds: u64) -> u32 {
    let minutes = total_seconds.saturating_add(30) / 60;
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

/// Human label for a duration, e.g. "25-minute" or "1h 30m"
pub fn describe(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs % 60 != 0 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        format!("{} min", mins)
    } else if mins % 60 == 0 {
        format!("{}h", mins / 60)
    } else {
        format!("{}h {}m", mins / 60, mins % 60)
    }
}
