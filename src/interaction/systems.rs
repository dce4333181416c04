//! Interaction domain: hover attacks and the press-move-release gesture.

use bevy::prelude::*;
use bevy::window::{CursorEntered, CursorLeft, CursorMoved};
use rand::Rng;

use crate::behavior::{
    DeferredKind, Guard, MovementMode, PendingActions, ScreenPosition, Spirit, SpiritState,
    TransitionOutcome,
};
use crate::catalog::AnimationCatalog;
use crate::core::{SpiritRng, SpiritTuning};
use crate::health::{DamageCause, DamageEvent};

use super::components::{Attention, DragState, ReleaseKind, classify_release};

/// Pick the attack for the current state: a moving spirit attacks on the
/// move, otherwise one of the standing attacks at random. The second
/// element is the state to revert to afterwards.
pub(crate) fn pick_attack(
    state: SpiritState,
    rng: &mut impl Rng,
) -> (SpiritState, SpiritState) {
    if state.is_locomotion() {
        (SpiritState::WalkAttack, state)
    } else if rng.random_bool(0.5) {
        (SpiritState::Attack1, SpiritState::Walk)
    } else {
        (SpiritState::Attack2, SpiritState::Walk)
    }
}

/// Start an attack if nothing forbids it, then schedule the revert and
/// the cooldown release.
pub(crate) fn begin_attack(
    spirit: &mut Spirit,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    rng: &mut impl Rng,
    pending: &mut PendingActions,
) -> bool {
    if spirit.locked || !spirit.can_attack {
        return false;
    }
    if matches!(spirit.state, SpiritState::Hurt | SpiritState::Death) {
        return false;
    }

    let (attack, revert) = pick_attack(spirit.state, rng);
    if spirit.request_state(attack, catalog) != TransitionOutcome::Applied {
        return false;
    }

    spirit.can_attack = false;
    pending.schedule(
        tuning.attack_revert_delay,
        Guard::UnlockedAndStateIs(attack),
        DeferredKind::Request(revert),
    );
    pending.schedule(
        tuning.attack_revert_delay + tuning.attack_cooldown,
        Guard::Always,
        DeferredKind::EnableAttack,
    );
    true
}

/// Mark attention on enter. Returns whether this enter should provoke an
/// attack attempt. A locked or flinching spirit takes no notice at all,
/// so the flag stays clear too.
pub(crate) fn note_attention(attention: &mut Attention, spirit: &Spirit) -> bool {
    if attention.hovered {
        return false;
    }
    if spirit.locked || matches!(spirit.state, SpiritState::Hurt | SpiritState::Death) {
        return false;
    }
    attention.hovered = true;
    true
}

/// Hover tracking. Entering the window provokes an attack.
pub(crate) fn handle_cursor_attention(
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut rng: ResMut<SpiritRng>,
    mut attention: ResMut<Attention>,
    drag: Res<DragState>,
    mut entered: MessageReader<CursorEntered>,
    mut left: MessageReader<CursorLeft>,
    mut spirits: Query<&mut Spirit>,
    mut pending: ResMut<PendingActions>,
) {
    let Ok(mut spirit) = spirits.single_mut() else {
        return;
    };

    for _ in left.read() {
        attention.hovered = false;
    }
    for _ in entered.read() {
        if note_attention(&mut attention, &spirit) && !drag.dragging {
            begin_attack(&mut spirit, &tuning, &catalog, &mut rng.0, &mut pending);
        }
    }
}

/// Press picks the spirit up, movement carries the window with the
/// cursor, release resolves into a poke or a fall.
pub(crate) fn handle_drag(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut moved: MessageReader<CursorMoved>,
    mut drag: ResMut<DragState>,
    mut spirits: Query<(&mut Spirit, &mut ScreenPosition)>,
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut pending: ResMut<PendingActions>,
    mut damage: MessageWriter<DamageEvent>,
) {
    let Ok((mut spirit, mut position)) = spirits.single_mut() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !drag.dragging {
        // A dying spirit cannot be picked up.
        if spirit.is_dying() {
            return;
        }
        let grab = windows
            .single()
            .ok()
            .and_then(|w| w.cursor_position())
            .unwrap_or(catalog.frame_size_vec2() / 2.0);
        drag.dragging = true;
        drag.started_at = time.elapsed_secs();
        drag.grab_offset = grab;
        drag.start_pos = position.as_vec2();
        spirit.locked = true;
        spirit.mode = MovementMode::Dragging;
        return;
    }

    if drag.dragging {
        let next = drag_update(
            position.as_vec2(),
            drag.grab_offset,
            moved.read().map(|e| e.position),
        );
        position.x = next.x;
        position.y = next.y;

        if buttons.just_released(MouseButton::Left) {
            drag.dragging = false;
            let held = time.elapsed_secs() - drag.started_at;
            let travel = position.as_vec2().distance(drag.start_pos);

            spirit.locked = false;
            spirit.mode = MovementMode::None;
            match classify_release(held, travel, &tuning) {
                // The state is left alone here: the hurt path reverts to
                // whatever locomotion the spirit was in before the press.
                ReleaseKind::Click => {
                    damage.write(DamageEvent {
                        amount: 1,
                        cause: DamageCause::Click,
                    });
                }
                ReleaseKind::Drag => {
                    release_into_fall(&mut spirit, &position, &catalog, &tuning, &mut pending);
                }
            }
        }
    }
}

/// Window position that keeps the grab point under the latest cursor
/// sample. Earlier samples in the same batch are superseded, not summed;
/// every sample is relative to the same window origin.
pub(crate) fn drag_update(
    position: Vec2,
    grab_offset: Vec2,
    samples: impl IntoIterator<Item = Vec2>,
) -> Vec2 {
    match samples.into_iter().last() {
        Some(cursor) => position + (cursor - grab_offset),
        None => position,
    }
}

/// Let go mid-air: dangle briefly in idle, then fall from here.
pub(crate) fn release_into_fall(
    spirit: &mut Spirit,
    position: &ScreenPosition,
    catalog: &AnimationCatalog,
    tuning: &SpiritTuning,
    pending: &mut PendingActions,
) {
    use crate::behavior::systems::{begin_fall, safe_request};

    safe_request(spirit, SpiritState::Idle, catalog, tuning, pending);
    begin_fall(spirit, position);
}
