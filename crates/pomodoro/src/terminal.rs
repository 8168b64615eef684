//! Real terminal: ratatui for drawing, crossterm for keys
//!
//! [`TerminalDisplay`] owns raw mode and the alternate screen for as long as
//! it lives and puts the terminal back when dropped, so an error or a cancel
//! never leaves the shell in raw mode.

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::warn;

use crate::countdown::{Display, Input, Key, Screen};

/// Full-screen display on stdout
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalDisplay {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show) {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl Display for TerminalDisplay {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        self.terminal.draw(|f| render(f, screen))?;
        Ok(())
    }
}

/// Draw `screen` as a block centered both ways
pub fn render(f: &mut Frame, screen: &Screen) {
    let area = f.area();
    let height = u16::try_from(screen.lines.len()).unwrap_or(u16::MAX).min(area.height);
    let top = (area.height - height) / 2;

    let block = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height,
    };

    let lines: Vec<Line> = screen.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    f.render_widget(clock, block);
}

/// Keyboard input from crossterm's event queue
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl Input for KeyboardInput {
    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(None);
            }
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(map_key(key))),
            Event::Resize(_, _) => Ok(Some(Key::Redraw)),
            _ => Ok(None),
        }
    }
}

/// Translate a key press into what the engine cares about
pub fn map_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Interrupt
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
        _ => Key::Other,
    }
}
