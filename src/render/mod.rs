//! Domain: presentation. Applies the active clip and cadence to the
//! sprite, advances frames, mirrors facing, dims a carried spirit, draws
//! the health bar, and moves the OS window to track the spirit.

use bevy::prelude::*;

pub mod systems;


/// Health bar thickness in pixels.
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Vertical strip reserved above the sprite for the bar.
pub const HEALTH_BAR_AREA: f32 = 9.0;

/// Frame playback clock for the active clip.
#[derive(Component, Debug)]
pub struct Playback {
    pub timer: Timer,
    pub frame: u32,
    pub frames: u32,
    /// Spirit epoch this playback was built for. A mismatch means the
    /// clip needs re-applying.
    pub applied_epoch: Option<u64>,
}

impl Playback {
    pub fn new(period: f32, frames: u32) -> Self {
        Self {
            timer: Timer::from_seconds(period, TimerMode::Repeating),
            frame: 0,
            frames,
            applied_epoch: None,
        }
    }
}

/// Marker for the bar sprite above the spirit.
#[derive(Component, Debug)]
pub struct HealthBar;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (systems::spawn_camera, systems::size_window_to_frame),
        )
        .add_systems(
            Update,
            (
                systems::attach_presentation,
                systems::apply_state_clip,
                systems::advance_frames,
                systems::apply_facing,
                systems::apply_drag_opacity,
                systems::update_health_bar,
                systems::sync_window,
            )
                .chain(),
        );
    }
}
