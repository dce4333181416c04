//! Interaction domain: pointer attention and drag bookkeeping.

use bevy::prelude::*;

use crate::core::SpiritTuning;

/// Whether the pointer is currently over the spirit's window.
#[derive(Resource, Debug, Default)]
pub struct Attention {
    pub hovered: bool,
}

/// Bookkeeping for a press-move-release gesture. The press position and
/// time let release classify itself as a click or a drag.
#[derive(Resource, Debug, Default)]
pub struct DragState {
    pub dragging: bool,
    /// App time at press, in seconds.
    pub started_at: f32,
    /// Cursor position inside the window at press.
    pub grab_offset: Vec2,
    /// Window position on screen at press.
    pub start_pos: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Short press with little travel: a poke.
    Click,
    /// Anything longer or farther: a carry, released into a fall.
    Drag,
}

/// A press qualifies as a click only when both the hold time and the
/// travel distance stay under their thresholds.
pub fn classify_release(
    held_secs: f32,
    travel_px: f32,
    tuning: &SpiritTuning,
) -> ReleaseKind {
    if held_secs <= tuning.click_max_duration && travel_px <= tuning.click_max_travel {
        ReleaseKind::Click
    } else {
        ReleaseKind::Drag
    }
}
