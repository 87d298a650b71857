//! Translate crossterm mouse reports into pointer gestures.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::CellMetrics;
use crate::gesture::{PointerEvent, Timestamp};

/// Maps one mouse button's press/drag/release onto [`PointerEvent`]s in
/// logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct PointerMapper {
    metrics: CellMetrics,
    button: MouseButton,
}

impl PointerMapper {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            metrics,
            button: MouseButton::Left,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// `None` for reports that are not part of a gesture with the tracked
    /// button (hover, scroll, other buttons).
    pub fn map(&self, mouse: &MouseEvent, timestamp: Timestamp) -> Option<PointerEvent> {
        let location = self.metrics.point_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) if button == self.button => {
                Some(PointerEvent::down(location, timestamp))
            }
            MouseEventKind::Drag(button) if button == self.button => {
                Some(PointerEvent::moved(location, timestamp))
            }
            MouseEventKind::Up(button) if button == self.button => {
                Some(PointerEvent::ended(location, timestamp))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::gesture::GesturePhase;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn maps_left_button_gesture_in_logical_pixels() {
        let mapper = PointerMapper::new(CellMetrics::new(8.0, 16.0));
        let ts = Timestamp::from_millis(42);

        let down = mapper
            .map(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 2), ts)
            .unwrap();
        assert_eq!(down.phase, GesturePhase::Down);
        assert_eq!(down.location, Point::new(24.0, 32.0));
        assert_eq!(down.timestamp, ts);

        let drag = mapper
            .map(&mouse(MouseEventKind::Drag(MouseButton::Left), 9, 2), ts)
            .unwrap();
        assert_eq!(drag.phase, GesturePhase::Moved);
        assert_eq!(drag.location.x - down.location.x, 48.0);

        let up = mapper
            .map(&mouse(MouseEventKind::Up(MouseButton::Left), 9, 2), ts)
            .unwrap();
        assert_eq!(up.phase, GesturePhase::Ended);
    }

    #[test]
    fn ignores_other_buttons_and_motion() {
        let mapper = PointerMapper::new(CellMetrics::default());
        let ts = Timestamp::ZERO;
        assert!(
            mapper
                .map(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), ts)
                .is_none()
        );
        assert!(mapper.map(&mouse(MouseEventKind::Moved, 0, 0), ts).is_none());
        assert!(
            mapper
                .map(&mouse(MouseEventKind::ScrollDown, 0, 0), ts)
                .is_none()
        );

        let right = mapper.with_button(MouseButton::Right);
        assert!(
            right
                .map(&mouse(MouseEventKind::Up(MouseButton::Right), 0, 0), ts)
                .is_some()
        );
    }
}
