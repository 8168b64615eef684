//! pomodoro - Full-screen terminal pomodoro timer
//!
//! Usage:
//!   pomodoro                    Start a timer (default: 25 mins)
//!   pomodoro 1h30m              Start a timer of any length
//!   pomodoro --status           Show today's completed pomodoros
//!   pomodoro --reset            Reset today's count to zero
//!   pomodoro --stats [RANGE]    Show statistics (all, today, week, month, N, START:END)

use anyhow::{Context, Result};
use clap::Parser;
use pomodoro_core::{format, Config, Paths};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use pomodoro::countdown::{Countdown, Outcome, SystemClock};
use pomodoro::duration;
use pomodoro::stats::StatsRange;
use pomodoro::store::SessionStore;
use pomodoro::terminal::{KeyboardInput, TerminalDisplay};

/// Pomodoro - Full-screen terminal countdown timer
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "Full-screen terminal pomodoro timer with daily session tracking")]
#[command(version)]
#[command(after_help = r#"DURATION:
    A bare number is minutes. Units: h/hour(s), m/min(s)/minute(s),
    s/sec(s)/second(s). Parts may be combined: 1h30m, "1 hour 30 minutes".

KEYS:
    q, Esc      Stop the timer (not counted)
    Ctrl-C      Stop the timer (not counted)
    r           Start another pomodoro (when time is up)

STATS RANGES:
    all                     Every recorded day (default)
    today                   Today only
    week                    Last 7 days
    month                   Last 30 days
    N                       Last N days
    2025-01-01:2025-01-31   Inclusive date span

EXAMPLES:
    pomodoro                    # Start 25-minute pomodoro
    pomodoro 50                 # 50-minute session
    pomodoro 1 hour 30 minutes  # 90-minute session
    pomodoro 90s                # 90-second session
    pomodoro --status           # Pomodoros completed today
    pomodoro --stats week       # Last 7 days

FILES:
    ~/.pomodoro/sessions.json   Daily counts and minutes
    ~/.pomodoro/config.json     Optional: {"default_minutes": 25}
    Set POMODORO_HOME to use a different directory."#)]
struct Cli {
    /// Timer duration (default: 25 minutes)
    #[arg(value_name = "DURATION", conflicts_with_all = ["status", "reset", "stats"])]
    duration: Vec<String>,

    /// Show today's pomodoro count and exit
    #[arg(long, conflicts_with_all = ["reset", "stats"])]
    status: bool,

    /// Reset today's pomodoro count
    #[arg(long, conflicts_with = "stats")]
    reset: bool,

    /// Show statistics for a range (default: all)
    #[arg(long, value_name = "RANGE", num_args = 0..=1, default_missing_value = "all")]
    stats: Option<String>,
}

// ANSI color codes
const GREEN: &str = "\x1b[0;32m";
const CYAN: &str = "\x1b[0;36m";
const RED: &str = "\x1b[0;31m";
const BOLD: &str = "\x1b[1m";
const NC: &str = "\x1b[0m";

/// Check if stdout is a TTY and colors should be used
fn use_colors() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Conditionally apply color
fn color(code: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", code, text, NC)
    } else {
        text.to_string()
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the clock
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = Paths::new();
    let store = SessionStore::new(&paths);

    if cli.status {
        return cmd_status(&store);
    }
    if cli.reset {
        return cmd_reset(&store);
    }
    if let Some(range) = cli.stats {
        return cmd_stats(&store, &range);
    }

    let config = Config::load(&paths.config_file())?;
    cmd_timer(store, &config, &cli.duration)
}

/// Run the full-screen countdown
fn cmd_timer(mut store: SessionStore, config: &Config, words: &[String]) -> Result<()> {
    let length = if words.is_empty() {
        Duration::from_secs(u64::from(config.default_minutes) * 60)
    } else {
        duration::parse(&words.join(" "))?
    };

    println!(
        "{} Starting {} pomodoro timer...",
        color(RED, "[pomodoro]"),
        duration::describe(length)
    );

    let display = TerminalDisplay::enter().context("Failed to set up the terminal")?;
    let mut countdown = Countdown::new(SystemClock, display, KeyboardInput);
    let result = countdown.run(length.as_secs(), &mut store);

    // Leave the alternate screen before printing anything else
    drop(countdown.into_display());
    let outcome = result?;

    let today = store.today_count()?;
    println!();
    match outcome {
        Outcome::Completed => println!(
            "{} Great work! You completed {} today.",
            color(GREEN, "[ok]"),
            format::plural(today, "pomodoro")
        ),
        Outcome::Cancelled => println!(
            "{} Session interrupted. Pomodoros completed today: {}",
            color(CYAN, "[info]"),
            today
        ),
    }
    println!();

    Ok(())
}

/// Show today's count
fn cmd_status(store: &SessionStore) -> Result<()> {
    let count = store.today_count()?;
    println!("{} {}", color(CYAN, "Pomodoros completed today:"), count);
    Ok(())
}

/// Reset today's count
fn cmd_reset(store: &SessionStore) -> Result<()> {
    store.reset_today()?;
    println!("{} Today's pomodoro count has been reset to 0.", color(GREEN, "[ok]"));
    Ok(())
}

/// Show statistics for a range
fn cmd_stats(store: &SessionStore, token: &str) -> Result<()> {
    let range = StatsRange::parse(token)?;
    let stats = store.compute_stats(range)?;

    let (hours, mins) = stats.total_time();

    println!("{}", color(BOLD, &format!("Pomodoro Statistics ({})", range)));
    println!();
    println!("  {}   {}", color(CYAN, "Total Sessions:"), stats.total_sessions);
    println!(
        "  {}       {}h {}m ({} minutes)",
        color(CYAN, "Total Time:"),
        hours,
        mins,
        stats.total_minutes
    );
    println!("  {}      {}", color(CYAN, "Active Days:"), stats.days_active);
    println!(
        "  {} {:.1}",
        color(CYAN, "Avg / Active Day:"),
        stats.average_per_active_day
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_color_with_tty() {
        // Just verify the color function doesn't panic
        let result = color(RED, "test");
        assert!(result.contains("test"));
    }

    #[test]
    fn test_no_args_runs_default_timer() {
        let cli = Cli::try_parse_from(["pomodoro"]).unwrap();
        assert!(cli.duration.is_empty());
        assert!(!cli.status && !cli.reset && cli.stats.is_none());
    }

    #[test]
    fn test_duration_words_are_collected() {
        let cli = Cli::try_parse_from(["pomodoro", "1", "hour", "30", "minutes"]).unwrap();
        assert_eq!(cli.duration.join(" "), "1 hour 30 minutes");
        assert_eq!(
            duration::parse(&cli.duration.join(" ")).unwrap(),
            Duration::from_secs(90 * 60)
        );
    }

    #[test]
    fn test_stats_range_is_optional() {
        let cli = Cli::try_parse_from(["pomodoro", "--stats"]).unwrap();
        assert_eq!(cli.stats.as_deref(), Some("all"));

        let cli = Cli::try_parse_from(["pomodoro", "--stats", "week"]).unwrap();
        assert_eq!(cli.stats.as_deref(), Some("week"));

        let cli = Cli::try_parse_from(["pomodoro", "--stats", "2025-01-01:2025-01-31"]).unwrap();
        assert_eq!(cli.stats.as_deref(), Some("2025-01-01:2025-01-31"));
    }

    #[test]
    fn test_modes_conflict() {
        assert!(Cli::try_parse_from(["pomodoro", "--status", "--reset"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro", "--reset", "--stats"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro", "25", "--status"]).is_err());
    }
}
