//! Popover tuning knobs.
//!
//! `PopoverConfig::default()` reproduces the stock behavior. The demo binary
//! builds one from its command line and runs it through
//! [`PopoverConfig::validate`] before use.

use std::time::Duration;

use crate::constants::{
    DEFAULT_CONTENT_HEIGHT, DEFAULT_CONTENT_WIDTH, DEFAULT_MARGIN, DRAG_THRESHOLD,
    FIRST_MOVE_WINDOW, SNAP_TRANSITION,
};
use crate::error::PipError;
use crate::geometry::CellMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverConfig {
    /// Snap threshold in logical pixels.
    pub drag_threshold: f32,
    pub first_move_window: Duration,
    pub transition: Duration,
    pub metrics: CellMetrics,
    /// Cells kept clear between the popover and its container edges.
    pub margin: u16,
    pub width: u16,
    pub height: u16,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            first_move_window: FIRST_MOVE_WINDOW,
            transition: SNAP_TRANSITION,
            metrics: CellMetrics::default(),
            margin: DEFAULT_MARGIN,
            width: DEFAULT_CONTENT_WIDTH,
            height: DEFAULT_CONTENT_HEIGHT,
        }
    }
}

impl PopoverConfig {
    pub fn validate(&self) -> Result<(), PipError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(PipError::InvalidConfig(
                "drag threshold must be a non-negative number".to_string(),
            ));
        }
        if self.first_move_window.is_zero() {
            return Err(PipError::InvalidConfig(
                "first-move window must be longer than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("cell width", self.metrics.width),
            ("cell height", self.metrics.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PipError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        if self.width < 3 || self.height < 3 {
            return Err(PipError::InvalidConfig(
                "popover must be at least 3x3 cells".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PopoverConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_metrics() {
        let config = PopoverConfig {
            metrics: CellMetrics::new(0.0, 16.0),
            ..PopoverConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PipError::InvalidConfig(msg) if msg.contains("cell width")));
    }

    #[test]
    fn rejects_zero_window() {
        let config = PopoverConfig {
            first_move_window: Duration::ZERO,
            ..PopoverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
