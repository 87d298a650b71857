pub mod console;
pub mod pointer;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

use crate::gesture::Timestamp;
use crate::ui::UiFrame;

/// A terminal event together with the time the driver received it.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub event: Event,
    pub timestamp: Timestamp,
}

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<InputEvent>;
    /// Current time on the same clock `read` stamps events with.
    fn now(&self) -> Timestamp;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<InputEvent> {
        (**self).read()
    }

    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
