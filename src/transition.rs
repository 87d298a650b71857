use std::time::Duration;

use crate::geometry::FloatRect;
use crate::gesture::Timestamp;

/// Eased move of the popover between two placements.
///
/// Only the origin is interpolated; the size is taken from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: FloatRect,
    to: FloatRect,
    started: Timestamp,
    duration: Duration,
}

impl Transition {
    pub fn new(from: FloatRect, to: FloatRect, started: Timestamp, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn is_finished(&self, now: Timestamp) -> bool {
        now.saturating_since(self.started) >= self.duration
    }

    pub fn sample(&self, now: Timestamp) -> FloatRect {
        if self.is_finished(now) {
            return self.to;
        }
        let t = now.saturating_since(self.started).as_secs_f32() / self.duration.as_secs_f32();
        let eased = ease_out_cubic(t);
        FloatRect {
            x: lerp(self.from.x, self.to.x, eased),
            y: lerp(self.from.y, self.to.y, eased),
            ..self.to
        }
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn lerp(from: i32, to: i32, t: f32) -> i32 {
    from + ((to - from) as f32 * t).round() as i32
}
