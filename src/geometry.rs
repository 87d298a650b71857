//! Logical-pixel and cell geometry.
//!
//! Gesture math happens in logical pixels (`Point`, `Offset`) so the drag
//! thresholds mean the same thing regardless of terminal font size. Layout
//! and rendering happen in cells. `CellMetrics` converts between the two.

use std::ops::Sub;

use ratatui::layout::Rect;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};

/// A 2D translation in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub width: f32,
    pub height: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Signed rectangle origin with unsigned size.
///
/// A dragged popover may hang partially outside its container, so its origin
/// can go negative; drawing clips it back through [`FloatRect::clip_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.x
            && col < self.x + self.width as i32
            && row >= self.y
            && row < self.y + self.height as i32
    }

    /// Intersect with `bounds`, returning `None` when nothing is visible.
    pub fn clip_to(&self, bounds: Rect) -> Option<Rect> {
        let x0 = self.x.max(bounds.x as i32);
        let y0 = self.y.max(bounds.y as i32);
        let x1 = (self.x + self.width as i32).min(bounds.x as i32 + bounds.width as i32);
        let y1 = (self.y + self.height as i32).min(bounds.y as i32 + bounds.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

impl From<Rect> for FloatRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x as i32, rect.y as i32, rect.width, rect.height)
    }
}

/// Size of one terminal cell in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical position of the top-left corner of a cell.
    pub fn point_at(&self, col: u16, row: u16) -> Point {
        Point::new(col as f32 * self.width, row as f32 * self.height)
    }

    /// Cell containing a logical position.
    pub fn cell_at(&self, point: Point) -> (i32, i32) {
        (
            (point.x / self.width).floor() as i32,
            (point.y / self.height).floor() as i32,
        )
    }

    /// Whole-cell displacement closest to a logical translation.
    pub fn cells_for(&self, offset: Offset) -> (i32, i32) {
        (
            (offset.width / self.width).round() as i32,
            (offset.height / self.height).round() as i32,
        )
    }
}
