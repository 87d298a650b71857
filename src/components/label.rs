use ratatui::layout::{Alignment as TextAlignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext};
use crate::alignment::HorizontalEdge;
use crate::gesture::{GesturePhase, PointerEvent};
use crate::ui::UiFrame;

/// Text content that counts the taps it receives. Lines hug the screen edge
/// the popover rests against.
#[derive(Debug, Clone)]
pub struct LabelComponent {
    title: String,
    body: String,
    taps: usize,
}

impl LabelComponent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            taps: 0,
        }
    }

    pub fn taps(&self) -> usize {
        self.taps
    }
}

impl Component for LabelComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let title_style = if ctx.dragging() {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut lines = vec![Line::styled(self.title.clone(), title_style)];
        lines.extend(self.body.lines().map(|line| Line::from(line.to_string())));
        if self.taps > 0 {
            lines.push(Line::from(format!("taps: {}", self.taps)));
        }
        let text_alignment = match ctx.alignment().horizontal {
            HorizontalEdge::Leading => TextAlignment::Left,
            HorizontalEdge::Center => TextAlignment::Center,
            HorizontalEdge::Trailing => TextAlignment::Right,
        };
        let paragraph = Paragraph::new(Text::from(lines))
            .alignment(text_alignment)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn handle_pointer(&mut self, event: &PointerEvent, _ctx: &ComponentContext) -> bool {
        if event.phase == GesturePhase::Ended {
            self.taps += 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Alignment;
    use crate::geometry::Point;
    use crate::gesture::Timestamp;
    use ratatui::buffer::Buffer;

    #[test]
    fn counts_releases_only() {
        let mut label = LabelComponent::new("PiP", "hello");
        let ctx = ComponentContext::default();
        let at = Point::new(0.0, 0.0);
        assert!(!label.handle_pointer(&PointerEvent::down(at, Timestamp::ZERO), &ctx));
        assert!(label.handle_pointer(&PointerEvent::ended(at, Timestamp::ZERO), &ctx));
        assert_eq!(label.taps(), 1);
    }

    #[test]
    fn text_follows_resting_edge() {
        let area = Rect::new(0, 0, 10, 2);
        let mut label = LabelComponent::new("PiP", "");
        for (alignment, col) in [(Alignment::TOP_LEADING, 0), (Alignment::TOP_TRAILING, 7)] {
            let mut buffer = Buffer::empty(area);
            let mut frame = UiFrame::from_parts(area, &mut buffer);
            label.render(&mut frame, area, &ComponentContext::new(alignment));
            assert_eq!(buffer.cell((col, 0)).map(|c| c.symbol()), Some("P"), "{alignment:?}");
        }
    }
}
