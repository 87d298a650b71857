//! Drag-and-snap state machine.
//!
//! [`DragSnapController`] consumes the translation stream of a single drag
//! gesture and decides which corner the popover should settle into when the
//! gesture ends. It knows nothing about hit-testing or rendering; the
//! [`Popover`](crate::popover::Popover) feeds it translations only for
//! gestures that started on the popover itself.
//!
//! The lifecycle of a gesture:
//!
//! 1. The first move is recorded but not applied ([`DragOutcome::Armed`]).
//! 2. A move arriving within the first-move window of the previous one turns
//!    the session into a drag ([`DragOutcome::Started`]) and every later move
//!    inside the window updates the offset ([`DragOutcome::Moved`]).
//! 3. A move arriving after the window has elapsed is dropped and re-arms the
//!    gate ([`DragOutcome::Dropped`]). This applies mid-drag as well; the
//!    session stays in the dragging state.
//! 4. Release snaps each axis independently once its translation exceeds the
//!    threshold.

use std::time::Duration;

use crate::alignment::{Alignment, HorizontalEdge, VerticalEdge};
use crate::constants::{DRAG_THRESHOLD, FIRST_MOVE_WINDOW};
use crate::geometry::Offset;
use crate::gesture::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    FirstMove,
    Dragging,
}

/// Transient state of the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSessionState {
    is_dragging: bool,
    offset: Offset,
    last_event_timestamp: Option<Timestamp>,
}

impl DragSessionState {
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Raw stored offset. Prefer [`effective_offset`](Self::effective_offset)
    /// for layout.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Offset to displace the popover by; zero unless a drag is active.
    pub fn effective_offset(&self) -> Offset {
        if self.is_dragging {
            self.offset
        } else {
            Offset::ZERO
        }
    }

    pub fn last_event_timestamp(&self) -> Option<Timestamp> {
        self.last_event_timestamp
    }

    pub fn phase(&self) -> DragPhase {
        if self.is_dragging {
            DragPhase::Dragging
        } else if self.last_event_timestamp.is_some() {
            DragPhase::FirstMove
        } else {
            DragPhase::Idle
        }
    }
}

/// What a single gesture callback did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// First move recorded; nothing displaced yet.
    Armed,
    /// Move was too late after the previous one; the gate was re-armed.
    Dropped,
    /// Session became a drag.
    Started { offset: Offset },
    /// Active drag updated its offset.
    Moved { offset: Offset },
    /// Drag released and at least one axis crossed the threshold.
    Snapped { from: Alignment, to: Alignment },
    /// Drag released inside the dead zone.
    Settled { alignment: Alignment },
    /// Gesture ended without ever becoming a drag.
    Released,
    /// Host cancelled the gesture.
    Cancelled,
}

impl DragOutcome {
    /// Whether the popover should animate back into its resting place.
    pub fn ends_drag(&self) -> bool {
        matches!(self, DragOutcome::Snapped { .. } | DragOutcome::Settled { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSnapController {
    threshold: f32,
    first_move_window: Duration,
    session: DragSessionState,
}

impl Default for DragSnapController {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD, FIRST_MOVE_WINDOW)
    }
}

impl DragSnapController {
    pub fn new(threshold: f32, first_move_window: Duration) -> Self {
        Self {
            threshold,
            first_move_window,
            session: DragSessionState::default(),
        }
    }

    pub fn session(&self) -> &DragSessionState {
        &self.session
    }

    /// Feed a "changed" callback: cumulative `translation` observed at
    /// `timestamp`.
    pub fn on_changed(&mut self, translation: Offset, timestamp: Timestamp) -> DragOutcome {
        let previous = self.session.last_event_timestamp;
        self.session.last_event_timestamp = Some(timestamp);
        let Some(previous) = previous else {
            tracing::trace!(?timestamp, "drag armed");
            return DragOutcome::Armed;
        };
        if timestamp.saturating_since(previous) >= self.first_move_window {
            tracing::trace!(
                gap_ms = timestamp.saturating_since(previous).as_millis() as u64,
                dragging = self.session.is_dragging,
                "move outside window dropped"
            );
            return DragOutcome::Dropped;
        }
        let started = !self.session.is_dragging;
        self.session.is_dragging = true;
        self.session.offset = translation;
        if started {
            tracing::debug!(
                dx = translation.width,
                dy = translation.height,
                "drag started"
            );
            DragOutcome::Started {
                offset: translation,
            }
        } else {
            DragOutcome::Moved {
                offset: translation,
            }
        }
    }

    /// Feed the "ended" callback with the gesture's final `translation`.
    ///
    /// Returns the alignment decision relative to `current`. The session is
    /// reset in the same step, so the offset disappears exactly when the new
    /// alignment takes over.
    pub fn on_ended(&mut self, translation: Offset, current: Alignment) -> DragOutcome {
        if !self.session.is_dragging {
            self.reset();
            return DragOutcome::Released;
        }
        self.session.offset = translation;
        let to = snap_alignment(current, self.session.offset, self.threshold);
        self.reset();
        if to == current {
            tracing::debug!(alignment = ?current, "drag settled in dead zone");
            DragOutcome::Settled { alignment: current }
        } else {
            tracing::debug!(from = ?current, to = ?to, "drag snapped");
            DragOutcome::Snapped { from: current, to }
        }
    }

    pub fn cancel(&mut self) -> DragOutcome {
        self.reset();
        DragOutcome::Cancelled
    }

    /// Alignment to use once an on-screen keyboard is about to appear.
    pub fn keyboard_will_show(&self, current: Alignment) -> Alignment {
        current.with_vertical(VerticalEdge::Top)
    }

    fn reset(&mut self) {
        self.session = DragSessionState::default();
    }
}

/// Per-axis dead-zone test. An axis whose translation stays within
/// `[-threshold, threshold]` keeps its current edge.
pub fn snap_alignment(current: Alignment, offset: Offset, threshold: f32) -> Alignment {
    let vertical = if offset.height > threshold {
        VerticalEdge::Bottom
    } else if offset.height < -threshold {
        VerticalEdge::Top
    } else {
        current.vertical
    };
    let horizontal = if offset.width > threshold {
        HorizontalEdge::Trailing
    } else if offset.width < -threshold {
        HorizontalEdge::Leading
    } else {
        current.horizontal
    };
    Alignment::new(horizontal, vertical)
}
