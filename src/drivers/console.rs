use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{InputDriver, InputEvent, OutputDriver};
use crate::gesture::{Clock, Timestamp};
use crate::ui::UiFrame;

/// Reads crossterm events and stamps each one with the time it was pulled
/// off the terminal.
pub struct ConsoleInputDriver {
    clock: Clock,
    event_queue: VecDeque<InputEvent>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::with_clock(Clock::new())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            event_queue: VecDeque::new(),
        }
    }

    /// Queue an event as if it had been read from the terminal.
    pub fn push_event(&mut self, event: Event, timestamp: Timestamp) {
        self.event_queue.push_back(InputEvent { event, timestamp });
    }

    fn read_internal(&mut self) -> io::Result<InputEvent> {
        loop {
            let event = crossterm::event::read()?;
            let timestamp = self.clock.now();
            if let Some(event) = normalize(event) {
                return Ok(InputEvent { event, timestamp });
            }
        }
    }
}

// Terminals that report key releases would otherwise double every keystroke.
fn normalize(event: Event) -> Option<Event> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        other => Some(other),
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.event_queue.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<InputEvent> {
        if let Some(input) = self.event_queue.pop_front() {
            return Ok(input);
        }
        self.read_internal()
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| f(UiFrame::new(frame)))
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn queued_events_keep_their_timestamps() {
        let mut d = ConsoleInputDriver::new();
        d.push_event(Event::Resize(80, 24), Timestamp::from_millis(5));
        d.push_event(Event::FocusGained, Timestamp::from_millis(9));
        assert!(d.poll(Duration::from_millis(0)).unwrap());
        let first = d.read().unwrap();
        assert_eq!(first.event, Event::Resize(80, 24));
        assert_eq!(first.timestamp, Timestamp::from_millis(5));
        assert_eq!(d.read().unwrap().timestamp, Timestamp::from_millis(9));
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(normalize(Event::Key(key)).is_none());
        key.kind = KeyEventKind::Press;
        assert!(normalize(Event::Key(key)).is_some());
        assert!(normalize(Event::Resize(10, 20)).is_some());
    }
}
