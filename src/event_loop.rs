use std::io;
use std::time::Duration;

use crate::drivers::{InputDriver, InputEvent};
use crate::gesture::Timestamp;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler on each turn.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    /// An input event read from the driver.
    Input(InputEvent),
    /// The poll interval elapsed (or a burst of input was drained); a good
    /// moment to advance transitions and redraw.
    Tick(Timestamp),
}

/// Message pump for the UI thread.
///
/// This is the only place that polls the driver. Every event is dispatched
/// to the handler in arrival order, one at a time, which is the ordering the
/// popover's gesture handling relies on.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    ///
    /// The handler sees a `Tick` before every poll, then every input event
    /// that is ready.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        loop {
            let now = self.driver.now();
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Tick(now))? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain the queue so high-frequency bursts (mouse drags) do
                // not leave the redraw behind the input stream.
                loop {
                    let input = self.driver.read()?;
                    let flow = handler(&mut self.driver, LoopEvent::Input(input))?;
                    if let ControlFlow::Quit = flow {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
