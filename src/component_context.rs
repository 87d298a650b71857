//! Shared component rendering context
//!
//! `ComponentContext` carries the popover state a content component may want
//! to reflect while rendering or handling pointer input, so the `Component`
//! trait does not grow a boolean parameter per concern.

use crate::alignment::Alignment;

/// Context passed to `Component` trait methods.
///
/// - `dragging`: the popover is being moved by the pointer.
/// - `alignment`: corner the popover currently rests in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    dragging: bool,
    alignment: Alignment,
}

impl ComponentContext {
    pub const fn new(alignment: Alignment) -> Self {
        Self {
            dragging: false,
            alignment,
        }
    }

    pub const fn dragging(&self) -> bool {
        self.dragging
    }

    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Return a new `ComponentContext` with a modified `dragging` flag.
    pub const fn with_dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }
}
