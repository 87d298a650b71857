//! Shared crate-wide constants.

use std::time::Duration;

/// Distance (in logical pixels) a drag must travel along an axis before the
/// release snaps the popover to the opposite edge of that axis.
///
/// The comparison is strict: a translation of exactly this value keeps the
/// current edge.
pub const DRAG_THRESHOLD: f32 = 40.0;

/// Maximum gap between two consecutive move events for the second one to be
/// accepted as drag input.
///
/// The very first move of a gesture is always discarded; nested interactive
/// content tends to bubble a lone move before the pointer is released, and
/// this window is what tells that apart from a real drag.
pub const FIRST_MOVE_WINDOW: Duration = Duration::from_millis(300);

/// Length of the transition played when the popover settles into a corner.
pub const SNAP_TRANSITION: Duration = Duration::from_millis(200);

/// Logical pixels covered by one terminal column.
pub const DEFAULT_CELL_WIDTH: f32 = 8.0;

/// Logical pixels covered by one terminal row.
pub const DEFAULT_CELL_HEIGHT: f32 = 16.0;

/// Gap (in cells) kept between the popover and the edges of its container.
pub const DEFAULT_MARGIN: u16 = 1;

/// Preferred popover width in columns.
pub const DEFAULT_CONTENT_WIDTH: u16 = 28;

/// Preferred popover height in rows.
pub const DEFAULT_CONTENT_HEIGHT: u16 = 8;
