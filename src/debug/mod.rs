//! Debug overlay for development builds. F1 toggles a small text panel
//! showing the live spirit record.

use bevy::prelude::*;

use crate::behavior::{ScreenPosition, Spirit};
use crate::catalog::ActiveCharacter;
use crate::health::{Health, PendingHeal};

/// Marker for the overlay text node.
#[derive(Component, Debug)]
pub struct DebugOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_overlay)
            .add_systems(Update, (toggle_overlay, update_overlay));
    }
}

fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        DebugOverlay,
        Text::new(""),
        TextFont {
            font_size: 9.0,
            ..default()
        },
        TextColor(Color::srgb(0.2, 1.0, 0.2)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(1.0),
            left: Val::Px(1.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn toggle_overlay(
    keys: Res<ButtonInput<KeyCode>>,
    mut overlays: Query<&mut Visibility, With<DebugOverlay>>,
) {
    if !keys.just_pressed(KeyCode::F1) {
        return;
    }
    let Ok(mut visibility) = overlays.single_mut() else {
        return;
    };
    *visibility = match *visibility {
        Visibility::Hidden => Visibility::Visible,
        _ => Visibility::Hidden,
    };
}

fn update_overlay(
    character: Option<Res<ActiveCharacter>>,
    spirits: Query<(&Spirit, &ScreenPosition, &Health, &PendingHeal)>,
    mut overlays: Query<(&mut Text, &Visibility), With<DebugOverlay>>,
) {
    let Ok((mut text, visibility)) = overlays.single_mut() else {
        return;
    };
    if *visibility == Visibility::Hidden {
        return;
    }
    let Ok((spirit, position, health, heal)) = spirits.single() else {
        return;
    };

    let who = character.map(|c| c.name.clone()).unwrap_or_default();
    let heal_in = heal
        .remaining_secs()
        .map(|s| format!("{:.1}s", s))
        .unwrap_or_else(|| "-".to_string());
    text.0 = format!(
        "{}\n{} {:?}\nlocked={} atk={}\n({:.0},{:.0})\nhp {}/{} heal {}",
        who,
        spirit.state.name(),
        spirit.mode,
        spirit.locked,
        spirit.can_attack,
        position.x,
        position.y,
        health.current,
        health.max,
        heal_in
    );
}
