//! Countdown engine
//!
//! Drives one timer from start to expiry as an explicit state machine:
//!
//! ```text
//! Running --Elapsed--> Expired --Recorded--> AwaitingChoice --Restart--> Restarting --Started--> Running
//!    |                                              |
//!    +--Quit/Cancel--> Done(Cancelled)              +--Quit/Cancel--> Done(Completed)
//! ```
//!
//! The clock, screen and keyboard are behind the [`Clock`], [`Display`] and
//! [`Input`] traits so the loop runs the same against a real terminal and a
//! simulated one.

use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::duration::credited_minutes;
use crate::error::{PomodoroError, Result};
use crate::glyphs;
use pomodoro_core::format;

/// How a countdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Expired naturally and the user chose to quit
    Completed,
    /// Interrupted before expiry; nothing was recorded
    Cancelled,
}

/// Keyboard input the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Restart,
    Quit,
    /// Ctrl-C
    Interrupt,
    /// Terminal resized; redraw the current screen
    Redraw,
    Other,
}

/// Engine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Expired,
    AwaitingChoice,
    Restarting,
    Done(Outcome),
}

/// Things that move the engine between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A second passed without reaching zero
    Tick,
    /// Remaining time reached zero
    Elapsed,
    /// The completion was written to the session store
    Recorded,
    /// User asked for another round
    Restart,
    /// User asked to quit
    Quit,
    /// Interrupt signal
    Cancel,
    /// A new round's clock was started
    Started,
}

impl Phase {
    /// Transition table; pairs not listed leave the phase unchanged
    pub fn next(self, event: Event) -> Phase {
        match (self, event) {
            (Phase::Running, Event::Tick) => Phase::Running,
            (Phase::Running, Event::Elapsed) => Phase::Expired,
            (Phase::Running, Event::Quit | Event::Cancel) => Phase::Done(Outcome::Cancelled),
            (Phase::Expired, Event::Recorded) => Phase::AwaitingChoice,
            (Phase::AwaitingChoice, Event::Restart) => Phase::Restarting,
            (Phase::AwaitingChoice, Event::Quit | Event::Cancel) => Phase::Done(Outcome::Completed),
            (Phase::Restarting, Event::Started) => Phase::Running,
            (phase, _) => phase,
        }
    }
}

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time from the OS monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// What to put on the terminal: lines centered as a block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub lines: Vec<String>,
}

impl Screen {
    /// Big clock face for `remaining` seconds with today's count underneath
    pub fn countdown(remaining: u64, today: u32) -> Self {
        let mut lines = glyphs::banner(&format::clock(remaining));
        lines.push(String::new());
        lines.push(format!("Pomodoros today: {}", today));
        Self { lines }
    }

    /// End-of-timer banner with the restart/quit prompt
    pub fn expired(today: u32) -> Self {
        Self {
            lines: vec![
                "TIME'S UP!".to_string(),
                String::new(),
                format!("Pomodoros completed today: {}", today),
                String::new(),
                "What would you like to do?".to_string(),
                String::new(),
                "[r] Start another pomodoro".to_string(),
                "[q] Quit".to_string(),
            ],
        }
    }

    /// True when this screen shows the restart/quit prompt
    pub fn is_prompt(&self) -> bool {
        self.lines.iter().any(|l| l == "[r] Start another pomodoro")
    }
}

/// Full-screen output
pub trait Display {
    fn draw(&mut self, screen: &Screen) -> io::Result<()>;
}

/// Keyboard and signal input
pub trait Input {
    /// Wait up to `timeout` (forever when `None`) for a key
    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>>;
}

/// Where completed sessions go
pub trait SessionSink {
    /// Sessions completed today so far
    fn today_count(&mut self) -> Result<u32>;
    /// Count one completed session of `minutes`, returning today's new count
    fn record_completion(&mut self, minutes: u32) -> Result<u32>;
}

/// Remaining whole seconds after `elapsed`, never negative
pub fn remaining_seconds(total_seconds: u64, elapsed: Duration) -> u64 {
    total_seconds.saturating_sub(elapsed.as_secs())
}

/// Time until `elapsed` crosses its next whole second
fn until_next_tick(elapsed: Duration) -> Duration {
    let next = Duration::from_secs(elapsed.as_secs() + 1);
    next.saturating_sub(elapsed)
}

/// The countdown engine, bound to its clock, screen and keyboard
pub struct Countdown<C, D, I> {
    clock: C,
    display: D,
    input: I,
}

impl<C: Clock, D: Display, I: Input> Countdown<C, D, I> {
    pub fn new(clock: C, display: D, input: I) -> Self {
        Self {
            clock,
            display,
            input,
        }
    }

    /// Give back the display, e.g. to restore the terminal
    pub fn into_display(self) -> D {
        self.display
    }

    /// Run a `total_seconds` countdown until the user quits or cancels.
    ///
    /// Every natural expiry records one session in `sessions`. A cancel
    /// while the clock is running records nothing.
    pub fn run(&mut self, total_seconds: u64, sessions: &mut dyn SessionSink) -> Result<Outcome> {
        if total_seconds == 0 {
            return Err(PomodoroError::InvalidDuration(
                "duration must be greater than zero".to_string(),
            ));
        }

        let minutes = credited_minutes(total_seconds);
        let mut today = sessions.today_count()?;
        let mut phase = Phase::Running;
        let mut started = self.clock.now();
        let mut shown: Option<u64> = None;

        info!(total_seconds, minutes, "Starting countdown");

        loop {
            phase = match phase {
                Phase::Running => {
                    let elapsed = self.clock.now().saturating_duration_since(started);
                    let remaining = remaining_seconds(total_seconds, elapsed);

                    if shown != Some(remaining) {
                        self.display.draw(&Screen::countdown(remaining, today))?;
                        shown = Some(remaining);
                    }

                    if remaining == 0 {
                        phase.next(Event::Elapsed)
                    } else {
                        // Re-read the clock: drawing may have taken a while
                        let elapsed = self.clock.now().saturating_duration_since(started);
                        match self.input.poll(Some(until_next_tick(elapsed)))? {
                            Some(Key::Quit) => phase.next(Event::Quit),
                            Some(Key::Interrupt) => phase.next(Event::Cancel),
                            Some(Key::Redraw) => {
                                shown = None;
                                phase.next(Event::Tick)
                            }
                            _ => phase.next(Event::Tick),
                        }
                    }
                }
                Phase::Expired => {
                    today = sessions.record_completion(minutes)?;
                    self.display.draw(&Screen::expired(today))?;
                    phase.next(Event::Recorded)
                }
                Phase::AwaitingChoice => match self.input.poll(None)? {
                    Some(Key::Restart) => phase.next(Event::Restart),
                    Some(Key::Quit) => phase.next(Event::Quit),
                    Some(Key::Interrupt) => phase.next(Event::Cancel),
                    Some(Key::Redraw) => {
                        self.display.draw(&Screen::expired(today))?;
                        phase
                    }
                    _ => phase,
                },
                Phase::Restarting => {
                    debug!(total_seconds, "Restarting countdown");
                    started = self.clock.now();
                    shown = None;
                    phase.next(Event::Started)
                }
                Phase::Done(outcome) => {
                    info!(?outcome, today, "Countdown finished");
                    return Ok(outcome);
                }
            };
        }
    }
}
