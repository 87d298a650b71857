//! The picture-in-picture popover.
//!
//! [`Popover`] glues content, placement, and input together:
//!
//! - it anchors the content at the alignment held by the host's
//!   [`Binding`], displaced by the drag offset while a drag is active;
//! - it hit-tests every press before anything else, so a gesture that starts
//!   outside the content is handed to the outside-tap action and never
//!   becomes a drag, even if it later wanders over the popover;
//! - it forwards gestures that start on the content to the
//!   [`DragSnapController`] and commits the controller's decision back into
//!   the binding;
//! - while mounted and presented, it listens to a [`KeyboardNotifier`] and
//!   moves to the top edge when a keyboard is about to appear.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear};

use crate::alignment::Alignment;
use crate::binding::Binding;
use crate::components::{Component, ComponentContext};
use crate::config::PopoverConfig;
use crate::controller::{DragOutcome, DragSessionState, DragSnapController};
use crate::geometry::{FloatRect, Offset};
use crate::gesture::{GesturePhase, GestureTracker, PointerEvent, Timestamp};
use crate::keyboard::{KeyboardEvent, KeyboardNotifier, Subscription};
use crate::transition::Transition;
use crate::ui::UiFrame;

pub type OutsideTapAction = Box<dyn FnMut()>;

/// Who owns the gesture in progress. Decided once, on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureClaim {
    Outside,
    Popover,
}

struct KeyboardMount {
    notifier: KeyboardNotifier,
    subscription: Option<Subscription>,
    pending: Rc<RefCell<VecDeque<KeyboardEvent>>>,
}

pub struct Popover<C> {
    content: C,
    alignment: Binding<Alignment>,
    presented: Binding<bool>,
    on_outside_tap: Option<OutsideTapAction>,
    controller: DragSnapController,
    tracker: GestureTracker,
    claim: Option<GestureClaim>,
    config: PopoverConfig,
    bounds: Rect,
    transition: Option<Transition>,
    keyboard: Option<KeyboardMount>,
}

impl<C: Component> Popover<C> {
    pub fn new(
        content: C,
        alignment: Binding<Alignment>,
        presented: Binding<bool>,
        config: PopoverConfig,
    ) -> Self {
        Self {
            content,
            alignment,
            presented,
            on_outside_tap: None,
            controller: DragSnapController::new(config.drag_threshold, config.first_move_window),
            tracker: GestureTracker::default(),
            claim: None,
            config,
            bounds: Rect::default(),
            transition: None,
            keyboard: None,
        }
    }

    pub fn on_outside_tap(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_outside_tap = Some(Box::new(action));
        self
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment.get()
    }

    /// Host-driven placement change. Applied immediately, without a
    /// transition.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment.set(alignment);
        self.transition = None;
    }

    pub fn session(&self) -> &DragSessionState {
        self.controller.session()
    }

    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    pub fn is_presented(&self) -> bool {
        self.presented.get()
    }

    /// Show or hide the popover. Hiding abandons any gesture in progress and
    /// detaches from keyboard notifications until shown again.
    pub fn set_presented(&mut self, presented: bool) {
        if !self.presented.set(presented) {
            return;
        }
        tracing::debug!(presented, "popover presentation changed");
        if presented {
            self.attach_keyboard();
        } else {
            self.detach_keyboard();
            self.abandon_gesture();
            self.transition = None;
        }
    }

    /// Container the popover is laid out in. Updated on every render.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Start listening for keyboard notifications. The subscription is held
    /// only while the popover is presented.
    ///
    /// Notifications are queued, not applied on delivery. The host must call
    /// [`Popover::tick`] (or feed the next pointer event) for a queued
    /// "will show" to move the popover.
    pub fn mount(&mut self, notifier: &KeyboardNotifier) {
        self.keyboard = Some(KeyboardMount {
            notifier: notifier.clone(),
            subscription: None,
            pending: Rc::new(RefCell::new(VecDeque::new())),
        });
        if self.presented.get() {
            self.attach_keyboard();
        }
    }

    pub fn unmount(&mut self) {
        self.keyboard = None;
    }

    pub fn is_keyboard_attached(&self) -> bool {
        self.keyboard
            .as_ref()
            .is_some_and(|mount| mount.subscription.is_some())
    }

    /// Where the popover rests at its current alignment, ignoring any drag.
    pub fn resting_rect(&self) -> FloatRect {
        self.alignment.get().anchor(
            self.bounds,
            self.config.width,
            self.config.height,
            self.config.margin,
        )
    }

    /// Where the popover is drawn at `now`.
    pub fn rect_at(&self, now: Timestamp) -> FloatRect {
        let session = self.controller.session();
        if session.is_dragging() {
            return self.displaced(session.effective_offset());
        }
        match &self.transition {
            Some(transition) if !transition.is_finished(now) => transition.sample(now),
            _ => self.resting_rect(),
        }
    }

    /// Dispatch one pointer event. Returns `true` when the popover (or its
    /// outside-tap action) used the event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if !self.presented.get() {
            return false;
        }
        self.apply_keyboard_signals(event.timestamp);
        match event.phase {
            GesturePhase::Down => self.begin_gesture(event),
            GesturePhase::Moved => self.continue_gesture(event),
            GesturePhase::Ended => self.end_gesture(event),
            GesturePhase::Cancelled => {
                let owned = self.claim.is_some();
                self.abandon_gesture();
                owned
            }
        }
    }

    /// Advance time without input: apply queued keyboard signals and retire
    /// finished transitions.
    pub fn tick(&mut self, now: Timestamp) {
        if !self.presented.get() {
            return;
        }
        self.apply_keyboard_signals(now);
        if self
            .transition
            .as_ref()
            .is_some_and(|transition| transition.is_finished(now))
        {
            self.transition = None;
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, now: Timestamp) {
        self.bounds = area;
        if !self.presented.get() {
            return;
        }
        let Some(visible) = self.rect_at(now).clip_to(area) else {
            return;
        };
        let ctx = self.context();
        let border_style = if ctx.dragging() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(visible);
        frame.render_widget(Clear, visible);
        frame.render_widget(block, visible);
        self.content.render(frame, inner, &ctx);
    }

    fn begin_gesture(&mut self, event: &PointerEvent) -> bool {
        if self.claim.is_some() {
            // press without a release in between; the old gesture is gone
            self.abandon_gesture();
        }
        let (col, row) = self.config.metrics.cell_at(event.location);
        if !self.rect_at(event.timestamp).contains(col, row) {
            self.claim = Some(GestureClaim::Outside);
            tracing::debug!(col, row, "press outside popover");
            return self.fire_outside_tap();
        }
        self.claim = Some(GestureClaim::Popover);
        self.tracker.begin(event.location);
        let ctx = self.context();
        self.content.handle_pointer(event, &ctx);
        true
    }

    fn continue_gesture(&mut self, event: &PointerEvent) -> bool {
        match self.claim {
            Some(GestureClaim::Outside) => self.on_outside_tap.is_some(),
            Some(GestureClaim::Popover) => {
                let Some(translation) = self.tracker.translation(event.location) else {
                    return false;
                };
                let outcome = self.controller.on_changed(translation, event.timestamp);
                if matches!(outcome, DragOutcome::Started { .. }) {
                    self.transition = None;
                }
                true
            }
            None => false,
        }
    }

    fn end_gesture(&mut self, event: &PointerEvent) -> bool {
        match self.claim.take() {
            Some(GestureClaim::Outside) => self.on_outside_tap.is_some(),
            Some(GestureClaim::Popover) => {
                let translation = self
                    .tracker
                    .translation(event.location)
                    .unwrap_or(Offset::ZERO);
                self.tracker.end();
                let released_at = self.displaced(translation);
                let outcome = self.controller.on_ended(translation, self.alignment.get());
                if let DragOutcome::Snapped { to, .. } = outcome {
                    self.alignment.set(to);
                }
                if outcome.ends_drag() {
                    self.start_transition(released_at, event.timestamp);
                } else {
                    let ctx = self.context();
                    self.content.handle_pointer(event, &ctx);
                }
                true
            }
            None => false,
        }
    }

    fn abandon_gesture(&mut self) {
        self.claim = None;
        self.tracker.end();
        self.controller.cancel();
    }

    fn fire_outside_tap(&mut self) -> bool {
        match self.on_outside_tap.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    fn displaced(&self, offset: Offset) -> FloatRect {
        let (dx, dy) = self.config.metrics.cells_for(offset);
        self.resting_rect().translated(dx, dy)
    }

    fn start_transition(&mut self, from: FloatRect, now: Timestamp) {
        let to = self.resting_rect();
        let duration = self.config.transition;
        self.transition = (from != to).then(|| Transition::new(from, to, now, duration));
    }

    fn apply_keyboard_signals(&mut self, now: Timestamp) {
        let pending: Vec<KeyboardEvent> = match &self.keyboard {
            Some(mount) => mount.pending.borrow_mut().drain(..).collect(),
            None => return,
        };
        for signal in pending {
            match signal {
                KeyboardEvent::WillShow => {
                    let from = self.rect_at(now);
                    let target = self.controller.keyboard_will_show(self.alignment.get());
                    if self.alignment.set(target) {
                        tracing::debug!(alignment = ?target, "moved above keyboard");
                        if !self.controller.session().is_dragging() {
                            self.start_transition(from, now);
                        }
                    }
                }
                // Placement is not restored when the keyboard goes away.
                KeyboardEvent::WillHide => {}
            }
        }
    }

    fn attach_keyboard(&mut self) {
        let Some(mount) = self.keyboard.as_mut() else {
            return;
        };
        if mount.subscription.is_some() {
            return;
        }
        let pending = Rc::clone(&mount.pending);
        mount.subscription = Some(
            mount
                .notifier
                .subscribe(move |event| pending.borrow_mut().push_back(event)),
        );
    }

    fn detach_keyboard(&mut self) {
        if let Some(mount) = self.keyboard.as_mut() {
            mount.subscription = None;
            mount.pending.borrow_mut().clear();
        }
    }

    fn context(&self) -> ComponentContext {
        ComponentContext::new(self.alignment.get())
            .with_dragging(self.controller.session().is_dragging())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LabelComponent;
    use crate::geometry::Point;
    use std::cell::Cell;

    const BOUNDS: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn popover(alignment: Alignment) -> Popover<LabelComponent> {
        let mut popover = Popover::new(
            LabelComponent::new("PiP", ""),
            Binding::new(alignment),
            Binding::new(true),
            PopoverConfig::default(),
        );
        popover.set_bounds(BOUNDS);
        popover
    }

    fn center_of(rect: FloatRect, config: &PopoverConfig) -> Point {
        let col = rect.x + rect.width as i32 / 2;
        let row = rect.y + rect.height as i32 / 2;
        config.metrics.point_at(col as u16, row as u16)
    }

    fn ms(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn tap_on_content_reaches_component() {
        let mut p = popover(Alignment::TOP_LEADING);
        let at = center_of(p.resting_rect(), p.config());
        assert!(p.handle_pointer(&PointerEvent::down(at, ms(0))));
        assert!(p.handle_pointer(&PointerEvent::ended(at, ms(50))));
        assert_eq!(p.content().taps(), 1);
        assert_eq!(p.alignment(), Alignment::TOP_LEADING);
    }

    #[test]
    fn drag_displaces_by_whole_cells() {
        let mut p = popover(Alignment::TOP_LEADING);
        let rest = p.resting_rect();
        let start = center_of(rest, p.config());
        p.handle_pointer(&PointerEvent::down(start, ms(0)));
        p.handle_pointer(&PointerEvent::moved(Point::new(start.x + 8.0, start.y), ms(10)));
        p.handle_pointer(&PointerEvent::moved(Point::new(start.x + 24.0, start.y + 16.0), ms(20)));
        assert!(p.session().is_dragging());
        assert_eq!(p.rect_at(ms(20)), rest.translated(3, 1));
    }

    #[test]
    fn snap_starts_transition_from_release_point() {
        let mut p = popover(Alignment::TOP_LEADING);
        let start = center_of(p.resting_rect(), p.config());
        let end = Point::new(start.x + 200.0, start.y);
        p.handle_pointer(&PointerEvent::down(start, ms(0)));
        p.handle_pointer(&PointerEvent::moved(Point::new(start.x + 8.0, start.y), ms(10)));
        p.handle_pointer(&PointerEvent::moved(end, ms(20)));
        p.handle_pointer(&PointerEvent::ended(end, ms(30)));

        assert_eq!(p.alignment(), Alignment::TOP_TRAILING);
        let target = p.resting_rect();
        let early = p.rect_at(ms(30));
        assert_ne!(early, target);
        assert_eq!(p.rect_at(ms(1_000)), target);
        p.tick(ms(1_000));
        assert!(p.transition.is_none());
    }

    #[test]
    fn keyboard_avoidance_is_animated() {
        let notifier = KeyboardNotifier::new();
        let mut p = popover(Alignment::BOTTOM_LEADING);
        p.mount(&notifier);
        let bottom = p.resting_rect();

        notifier.notify(KeyboardEvent::WillShow);
        assert_eq!(p.alignment(), Alignment::BOTTOM_LEADING);

        p.tick(ms(0));
        assert_eq!(p.alignment(), Alignment::TOP_LEADING);
        assert!(p.transition.is_some());
        let top = p.resting_rect();
        assert!(top.y < bottom.y);

        let mid = p.rect_at(ms(100));
        assert!(mid.y > top.y && mid.y < bottom.y, "mid-transition rect: {mid:?}");
        assert_eq!(mid.x, bottom.x);
        assert_eq!(p.rect_at(ms(1_000)), top);
    }

    #[test]
    fn hidden_popover_ignores_input_and_detaches() {
        let notifier = KeyboardNotifier::new();
        let mut p = popover(Alignment::BOTTOM_LEADING);
        p.mount(&notifier);
        assert!(p.is_keyboard_attached());
        assert_eq!(notifier.listener_count(), 1);

        p.set_presented(false);
        assert!(!p.is_keyboard_attached());
        assert_eq!(notifier.listener_count(), 0);
        let at = center_of(p.resting_rect(), p.config());
        assert!(!p.handle_pointer(&PointerEvent::down(at, ms(0))));

        p.set_presented(true);
        assert_eq!(notifier.listener_count(), 1);
        p.unmount();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn outside_press_without_action_is_not_consumed_but_blocks_drag() {
        let mut p = popover(Alignment::BOTTOM_TRAILING);
        let inside = center_of(p.resting_rect(), p.config());
        let outside = Point::new(0.0, 0.0);
        assert!(!p.handle_pointer(&PointerEvent::down(outside, ms(0))));
        assert!(!p.handle_pointer(&PointerEvent::moved(inside, ms(10))));
        assert!(!p.handle_pointer(&PointerEvent::moved(inside, ms(20))));
        assert!(!p.session().is_dragging());
        assert!(!p.handle_pointer(&PointerEvent::ended(inside, ms(30))));
    }

    #[test]
    fn outside_action_fires_once_per_gesture() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut p = popover(Alignment::BOTTOM_TRAILING)
            .on_outside_tap(move || counter.set(counter.get() + 1));
        let outside = Point::new(0.0, 0.0);
        assert!(p.handle_pointer(&PointerEvent::down(outside, ms(0))));
        assert!(p.handle_pointer(&PointerEvent::moved(Point::new(40.0, 0.0), ms(10))));
        assert!(p.handle_pointer(&PointerEvent::ended(Point::new(40.0, 0.0), ms(20))));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn keyboard_hide_is_ignored() {
        let notifier = KeyboardNotifier::new();
        let mut p = popover(Alignment::BOTTOM_LEADING);
        p.mount(&notifier);
        notifier.notify(KeyboardEvent::WillShow);
        p.tick(ms(0));
        assert_eq!(p.alignment(), Alignment::TOP_LEADING);
        notifier.notify(KeyboardEvent::WillHide);
        p.tick(ms(10));
        assert_eq!(p.alignment(), Alignment::TOP_LEADING);
    }
}
