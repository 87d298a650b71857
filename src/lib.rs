//! A draggable, corner-snapping picture-in-picture popover for terminal UIs.
//!
//! The popover rests in one corner of its container. Dragging it past
//! [`constants::DRAG_THRESHOLD`] along an axis and releasing snaps it to the
//! opposite edge of that axis. It also moves to the top edge when a keyboard
//! is about to appear, and reports presses that land outside of it.
//!
//! The gesture logic ([`controller`]) works in logical pixels with
//! event-carried timestamps and has no terminal dependency; [`popover`] and
//! [`drivers`] bind it to `ratatui` and `crossterm`.

pub mod alignment;
pub mod binding;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod controller;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod gesture;
pub mod keyboard;
pub mod popover;
pub mod tracing_sub;
pub mod transition;
pub mod ui;

pub use alignment::{Alignment, HorizontalEdge, VerticalEdge};
pub use binding::Binding;
pub use config::PopoverConfig;
pub use controller::{DragOutcome, DragPhase, DragSessionState, DragSnapController};
pub use error::PipError;
pub use gesture::{GesturePhase, PointerEvent, Timestamp};
pub use keyboard::{KeyboardEvent, KeyboardNotifier, Subscription};
pub use popover::{OutsideTapAction, Popover};
