//! Pointer gesture primitives.
//!
//! Every [`PointerEvent`] carries the [`Timestamp`] it was observed at, so the
//! drag controller never reads a clock itself. Drivers stamp events through a
//! [`Clock`]; tests hand in synthetic timestamps.

use std::time::{Duration, Instant};

use crate::geometry::{Offset, Point};

/// Time since an arbitrary, per-clock epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Monotonic source of [`Timestamp`]s.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp(self.epoch.elapsed())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Down,
    Moved,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: GesturePhase,
    pub location: Point,
    pub timestamp: Timestamp,
}

impl PointerEvent {
    pub const fn new(phase: GesturePhase, location: Point, timestamp: Timestamp) -> Self {
        Self {
            phase,
            location,
            timestamp,
        }
    }

    pub const fn down(location: Point, timestamp: Timestamp) -> Self {
        Self::new(GesturePhase::Down, location, timestamp)
    }

    pub const fn moved(location: Point, timestamp: Timestamp) -> Self {
        Self::new(GesturePhase::Moved, location, timestamp)
    }

    pub const fn ended(location: Point, timestamp: Timestamp) -> Self {
        Self::new(GesturePhase::Ended, location, timestamp)
    }

    pub const fn cancelled(location: Point, timestamp: Timestamp) -> Self {
        Self::new(GesturePhase::Cancelled, location, timestamp)
    }
}

/// Cumulative translation of a single press-move-release gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTracker {
    start: Option<Point>,
}

impl GestureTracker {
    pub fn begin(&mut self, location: Point) {
        self.start = Some(location);
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Translation from the press location, or `None` outside a gesture.
    pub fn translation(&self, location: Point) -> Option<Offset> {
        self.start.map(|start| location - start)
    }

    pub fn end(&mut self) {
        self.start = None;
    }
}
