//! Render domain: clip application, frame playback, facing, the health
//! bar, and keeping the OS window glued to the spirit's screen position.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowPosition, WindowResolution};

use crate::behavior::{Direction, MovementMode, ScreenPosition, Spirit, SpiritState};
use crate::catalog::AnimationCatalog;
use crate::core::SpiritTuning;
use crate::health::Health;

use super::{HEALTH_BAR_AREA, HEALTH_BAR_HEIGHT, HealthBar, Playback};

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Size the window to one frame plus the health bar strip. Runs once the
/// catalog knows the frame size.
pub(crate) fn size_window_to_frame(
    catalog: Res<AnimationCatalog>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    let frame = catalog.frame_size_vec2();
    window.resolution = WindowResolution::new(frame.x as u32, (frame.y + HEALTH_BAR_AREA) as u32);
}

/// Give a freshly spawned spirit its sprite, playback clock, and health
/// bar child.
pub(crate) fn attach_presentation(
    mut commands: Commands,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    spirits: Query<Entity, (With<Spirit>, Without<Playback>)>,
) {
    let Ok(entity) = spirits.single() else {
        return;
    };
    let Some(clip) = catalog.clip(SpiritState::Walk) else {
        return;
    };

    let frame = catalog.frame_size_vec2();
    commands
        .entity(entity)
        .insert((
            Sprite {
                image: clip.image.clone(),
                texture_atlas: Some(TextureAtlas {
                    layout: clip.layout.clone(),
                    index: 0,
                }),
                ..default()
            },
            Transform::from_xyz(0.0, -HEALTH_BAR_AREA / 2.0, 0.0),
            Playback::new(tuning.frame_period, clip.frames),
        ))
        .with_children(|parent| {
            parent.spawn((
                HealthBar,
                Sprite {
                    color: Color::srgb(0.9, 0.2, 0.2),
                    custom_size: Some(Vec2::new(frame.x, HEALTH_BAR_HEIGHT)),
                    ..default()
                },
                Transform::from_xyz(0.0, frame.y / 2.0 + HEALTH_BAR_AREA / 2.0, 1.0),
            ));
        });
}

/// Swap in the clip for the current state whenever the epoch moves. The
/// epoch also moves on re-requests of the same state, which restarts the
/// clip from frame zero.
pub(crate) fn apply_state_clip(
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut spirits: Query<(&Spirit, &mut Sprite, &mut Playback)>,
) {
    let Ok((spirit, mut sprite, mut playback)) = spirits.single_mut() else {
        return;
    };
    if playback.applied_epoch == Some(spirit.epoch) {
        return;
    }
    let Some(clip) = catalog.clip(spirit.state) else {
        return;
    };

    sprite.image = clip.image.clone();
    sprite.texture_atlas = Some(TextureAtlas {
        layout: clip.layout.clone(),
        index: 0,
    });

    // Death plays at its own, slower cadence.
    let period = if spirit.state == SpiritState::Death {
        tuning.death_frame_period
    } else {
        tuning.frame_period
    };
    *playback = Playback::new(period, clip.frames);
    playback.applied_epoch = Some(spirit.epoch);
}

pub(crate) fn advance_frames(
    time: Res<Time>,
    mut spirits: Query<(&mut Sprite, &mut Playback)>,
) {
    let Ok((mut sprite, mut playback)) = spirits.single_mut() else {
        return;
    };
    if !playback.timer.tick(time.delta()).just_finished() {
        return;
    }

    playback.frame = (playback.frame + 1) % playback.frames.max(1);
    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        atlas.index = playback.frame as usize;
    }
}

pub(crate) fn apply_facing(mut spirits: Query<(&Spirit, &mut Sprite)>) {
    let Ok((spirit, mut sprite)) = spirits.single_mut() else {
        return;
    };
    sprite.flip_x = spirit.direction == Direction::Left;
}

/// Carried spirits go translucent.
pub(crate) fn apply_drag_opacity(
    tuning: Res<SpiritTuning>,
    mut spirits: Query<(&Spirit, &mut Sprite)>,
) {
    let Ok((spirit, mut sprite)) = spirits.single_mut() else {
        return;
    };
    let alpha = if spirit.mode == MovementMode::Dragging {
        tuning.drag_opacity
    } else {
        1.0
    };
    sprite.color = sprite.color.with_alpha(alpha);
}

/// Move the OS window to the spirit's screen position every frame.
pub(crate) fn sync_window(
    spirits: Query<&ScreenPosition, With<Spirit>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(position) = spirits.single() else {
        return;
    };
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.position = WindowPosition::At(IVec2::new(position.x as i32, position.y as i32));
}

/// Shrink the bar with health, keeping it anchored to the left edge.
pub(crate) fn update_health_bar(
    catalog: Res<AnimationCatalog>,
    spirits: Query<&Health, With<Spirit>>,
    mut bars: Query<(&mut Sprite, &mut Transform), With<HealthBar>>,
) {
    let Ok(health) = spirits.single() else {
        return;
    };
    let Ok((mut sprite, mut transform)) = bars.single_mut() else {
        return;
    };

    let full = catalog.frame_size_vec2().x;
    let width = (full * health.ratio()).max(1.0);
    sprite.custom_size = Some(Vec2::new(width, HEALTH_BAR_HEIGHT));
    transform.translation.x = -(full - width) / 2.0;
}
