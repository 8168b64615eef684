//! Formatting utilities

/// Format remaining seconds as a clock face: `MM:SS`, or `HH:MM:SS` from one hour up
pub fn clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Format a minute total in human-readable form (e.g. "1h 15m")
pub fn minutes(total: u32) -> String {
    let hours = total / 60;
    let mins = total % 60;

    if hours == 0 {
        format!("{}m", mins)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Pluralize a count: `1 pomodoro`, `3 pomodoros`
pub fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_under_an_hour() {
        assert_eq!(clock(0), "00:00");
        assert_eq!(clock(5), "00:05");
        assert_eq!(clock(25 * 60), "25:00");
        assert_eq!(clock(3599), "59:59");
    }

    #[test]
    fn test_clock_with_hours() {
        assert_eq!(clock(3600), "01:00:00");
        assert_eq!(clock(90 * 60 + 7), "01:30:07");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(minutes(0), "0m");
        assert_eq!(minutes(45), "45m");
        assert_eq!(minutes(135), "2h 15m");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "pomodoro"), "1 pomodoro");
        assert_eq!(plural(0, "pomodoro"), "0 pomodoros");
        assert_eq!(plural(3, "day"), "3 days");
    }
}
