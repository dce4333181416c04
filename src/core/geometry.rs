//! Screen geometry, re-queried from the monitors every movement tick.
//!
//! Positions use top-left window coordinates with y growing downward,
//! matching how the OS places the companion window.

use bevy::prelude::*;
use bevy::window::Monitor;

/// Usable rectangle of one monitor in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for ScreenRect {
    // Fallback when no monitor is reported yet.
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: 1920.0,
            bottom: 1080.0,
        }
    }
}

impl ScreenRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn mid_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Top-left y that rests a frame of `frame_height` on the ground line.
    pub fn ground_y(&self, frame_height: f32, margin: f32) -> f32 {
        self.bottom - frame_height - margin
    }

    pub fn at_left_edge(&self, x: f32) -> bool {
        x <= self.left
    }

    pub fn at_right_edge(&self, x: f32, frame_width: f32) -> bool {
        x + frame_width >= self.right
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    pub fn from_monitor(monitor: &Monitor) -> Self {
        let pos = monitor.physical_position.as_vec2();
        let size = Vec2::new(
            monitor.physical_width as f32,
            monitor.physical_height as f32,
        );
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + size.x,
            bottom: pos.y + size.y,
        }
    }
}

/// Rect of the monitor containing `point`, else the first monitor, else
/// the default rect. Multi-monitor setups can change between ticks, so
/// callers re-query rather than cache.
pub fn pick_rect(rects: impl Iterator<Item = ScreenRect>, point: Vec2) -> ScreenRect {
    let mut first = None;
    for rect in rects {
        if first.is_none() {
            first = Some(rect);
        }
        if rect.contains(point) {
            return rect;
        }
    }
    first.unwrap_or_default()
}

pub fn screen_rect_at(monitors: &Query<&Monitor>, point: Vec2) -> ScreenRect {
    pick_rect(monitors.iter().map(ScreenRect::from_monitor), point)
}
