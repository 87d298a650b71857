use ratatui::layout::Rect;

use crate::geometry::FloatRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    Top,
    Center,
    Bottom,
}

/// Where the popover rests inside its container.
///
/// The drag controller only ever produces the four corner values; centered
/// edges are accepted as a caller-supplied starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: HorizontalEdge,
    pub vertical: VerticalEdge,
}

impl Alignment {
    pub const TOP_LEADING: Alignment = Alignment::new(HorizontalEdge::Leading, VerticalEdge::Top);
    pub const TOP_TRAILING: Alignment =
        Alignment::new(HorizontalEdge::Trailing, VerticalEdge::Top);
    pub const BOTTOM_LEADING: Alignment =
        Alignment::new(HorizontalEdge::Leading, VerticalEdge::Bottom);
    pub const BOTTOM_TRAILING: Alignment =
        Alignment::new(HorizontalEdge::Trailing, VerticalEdge::Bottom);
    pub const CENTER: Alignment = Alignment::new(HorizontalEdge::Center, VerticalEdge::Center);

    pub const fn new(horizontal: HorizontalEdge, vertical: VerticalEdge) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const fn with_horizontal(self, horizontal: HorizontalEdge) -> Self {
        Self { horizontal, ..self }
    }

    pub const fn with_vertical(self, vertical: VerticalEdge) -> Self {
        Self { vertical, ..self }
    }

    pub const fn is_corner(&self) -> bool {
        !matches!(self.horizontal, HorizontalEdge::Center)
            && !matches!(self.vertical, VerticalEdge::Center)
    }

    /// Place a `width` x `height` box at this alignment inside `container`,
    /// keeping `margin` cells clear of the edges it is pinned to.
    ///
    /// The box is clamped to the container, and the margin shrinks when the
    /// container is too small to honor it.
    pub fn anchor(&self, container: Rect, width: u16, height: u16, margin: u16) -> FloatRect {
        let width = width.min(container.width);
        let height = height.min(container.height);
        let x =
            container.x + offset_along(self.horizontal_position(), container.width, width, margin);
        let y =
            container.y + offset_along(self.vertical_position(), container.height, height, margin);
        FloatRect::new(x as i32, y as i32, width, height)
    }

    fn horizontal_position(&self) -> AxisPosition {
        match self.horizontal {
            HorizontalEdge::Leading => AxisPosition::Start,
            HorizontalEdge::Center => AxisPosition::Middle,
            HorizontalEdge::Trailing => AxisPosition::End,
        }
    }

    fn vertical_position(&self) -> AxisPosition {
        match self.vertical {
            VerticalEdge::Top => AxisPosition::Start,
            VerticalEdge::Center => AxisPosition::Middle,
            VerticalEdge::Bottom => AxisPosition::End,
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BOTTOM_TRAILING
    }
}

#[derive(Clone, Copy)]
enum AxisPosition {
    Start,
    Middle,
    End,
}

fn offset_along(position: AxisPosition, available: u16, size: u16, margin: u16) -> u16 {
    let slack = available.saturating_sub(size);
    let margin = margin.min(slack);
    match position {
        AxisPosition::Start => margin,
        AxisPosition::Middle => slack / 2,
        AxisPosition::End => slack - margin,
    }
}
