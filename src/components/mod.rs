use ratatui::layout::Rect;

use crate::gesture::PointerEvent;
use crate::ui::UiFrame;

pub mod label;

pub use label::LabelComponent;

pub use crate::component_context::ComponentContext;

/// Content hosted inside a popover.
///
/// The popover owns placement, chrome, and dragging; a component only draws
/// into the inner area it is given and may react to taps on itself.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Called for presses and releases that land on the popover while no drag
    /// is in progress. Return `true` if the event was used.
    fn handle_pointer(&mut self, _event: &PointerEvent, _ctx: &ComponentContext) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::gesture::Timestamp;

    struct DummyComp;
    impl Component for DummyComp {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
    }

    #[test]
    fn default_handle_pointer_returns_false() {
        let mut d = DummyComp;
        assert!(!d.handle_pointer(
            &PointerEvent::down(Point::new(1.0, 1.0), Timestamp::ZERO),
            &ComponentContext::default()
        ));
    }
}
