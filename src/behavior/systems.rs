//! Behavior domain: patrol, triggers, climb/fall sequences, death, and the
//! deferred-action runner.
//!
//! Every system re-validates the lock and movement mode at the top instead
//! of assuming the world is unchanged since its clock was armed.

use bevy::prelude::*;
use bevy::window::Monitor;
use rand::Rng;

use crate::catalog::AnimationCatalog;
use crate::core::{ScreenRect, SpiritRng, SpiritTuning, screen_rect_at};
use crate::health::{DamageCause, DamageEvent, DamageOutcome, DamageResolved, Recovered};

use super::actions::{DeferredKind, Guard, PendingActions};
use super::components::{
    MovementMode, ScreenPosition, Spirit, SpiritState, TransitionOutcome,
};
use super::events::{DeathRequested, SpiritReset};
use super::resources::BehaviorClocks;

/// What a patrol tick did, so the caller can emit the right side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatrolEvent {
    None,
    JumpDetour,
    EdgeFlip { hurt: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FallOutcome {
    Continuing,
    /// Landed within a survivable drop.
    Landing,
    /// Dropped more than half the screen.
    FatalLanding,
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

pub(crate) fn spawn_spirit(
    mut commands: Commands,
    catalog: Res<AnimationCatalog>,
    tuning: Res<SpiritTuning>,
    monitors: Query<&Monitor>,
) {
    use crate::health::{Health, PendingHeal};

    let frame = catalog.frame_size_vec2();
    let rect = screen_rect_at(&monitors, Vec2::ZERO);
    let position = ScreenPosition::new(rect.left, rect.ground_y(frame.y, tuning.ground_margin));

    commands.spawn((
        Spirit::default(),
        position,
        Health::new(tuning.max_health),
        PendingHeal::default(),
    ));
    info!(
        "spirit awake at ({:.0}, {:.0})",
        position.x, position.y
    );
}

// -----------------------------------------------------------------------------
// Patrol
// -----------------------------------------------------------------------------

pub(crate) fn tick_patrol(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut clocks: ResMut<BehaviorClocks>,
    mut rng: ResMut<SpiritRng>,
    monitors: Query<&Monitor>,
    mut spirits: Query<(&mut Spirit, &mut ScreenPosition)>,
    mut pending: ResMut<PendingActions>,
    mut damage: MessageWriter<DamageEvent>,
) {
    let Ok((mut spirit, mut position)) = spirits.single_mut() else {
        return;
    };
    if spirit.locked || spirit.mode != MovementMode::Patrol {
        return;
    }
    if !clocks.movement.tick(time.delta()).just_finished() {
        return;
    }

    let rect = screen_rect_at(&monitors, position.as_vec2());
    let event = patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng.0,
        &mut pending,
        catalog.frame_size_vec2(),
    );
    if event == (PatrolEvent::EdgeFlip { hurt: true }) {
        damage.write(DamageEvent {
            amount: 1,
            cause: DamageCause::Exhaustion,
        });
    }
}

/// One patrol tick: constant-velocity translation, an occasional jump
/// detour near the midpoint, and the bounce at either extreme.
#[allow(clippy::too_many_arguments)]
pub(crate) fn patrol_step(
    spirit: &mut Spirit,
    position: &mut ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    rng: &mut impl Rng,
    pending: &mut PendingActions,
    frame: Vec2,
) -> PatrolEvent {
    if !spirit.state.is_locomotion() {
        return PatrolEvent::None;
    }

    let step = if spirit.state == SpiritState::Walk {
        tuning.walk_step
    } else {
        tuning.run_step
    };
    position.x += spirit.direction.sign() * step;
    position.y = rect.ground_y(frame.y, tuning.ground_margin);

    // Occasional detour jump near the midpoint of the screen.
    if (position.x - rect.mid_x()).abs() < tuning.midpoint_band
        && rng.random_bool(tuning.jump_chance)
        && spirit.request_state(SpiritState::Jump, catalog) == TransitionOutcome::Applied
    {
        pending.schedule(
            tuning.jump_revert_delay,
            Guard::StateIs(SpiritState::Jump),
            DeferredKind::RevertToPrevious,
        );
        return PatrolEvent::JumpDetour;
    }

    let hit_right =
        spirit.direction == super::Direction::Right && rect.at_right_edge(position.x, frame.x);
    let hit_left = spirit.direction == super::Direction::Left && rect.at_left_edge(position.x);
    if hit_right || hit_left {
        position.x = position.x.clamp(rect.left, rect.right - frame.x);
        return pause_and_flip(spirit, tuning, catalog, pending);
    }

    PatrolEvent::None
}

/// Bounce at a horizontal extreme: a walker rests then sprints back, a
/// runner overdoes it, smarts, and walks back.
fn pause_and_flip(
    spirit: &mut Spirit,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    pending: &mut PendingActions,
) -> PatrolEvent {
    spirit.mode = MovementMode::None;
    match spirit.state {
        SpiritState::Walk => {
            spirit.request_state(SpiritState::Idle, catalog);
            pending.schedule(
                tuning.flip_pause,
                Guard::Unlocked,
                DeferredKind::FlipAndContinue(SpiritState::Run),
            );
            PatrolEvent::EdgeFlip { hurt: false }
        }
        SpiritState::Run => {
            spirit.request_state(SpiritState::Hurt, catalog);
            pending.schedule(
                tuning.flip_pause,
                Guard::Unlocked,
                DeferredKind::FlipAndContinue(SpiritState::Walk),
            );
            PatrolEvent::EdgeFlip { hurt: true }
        }
        _ => PatrolEvent::None,
    }
}

// -----------------------------------------------------------------------------
// Periodic triggers
// -----------------------------------------------------------------------------

pub(crate) fn tick_jump_trigger(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut clocks: ResMut<BehaviorClocks>,
    mut rng: ResMut<SpiritRng>,
    mut spirits: Query<&mut Spirit>,
    mut pending: ResMut<PendingActions>,
) {
    let Ok(mut spirit) = spirits.single_mut() else {
        return;
    };
    // Suspended, not skipped: the clock does not advance while locked.
    if spirit.locked {
        return;
    }
    if !clocks.jump_check.tick(time.delta()).just_finished() {
        return;
    }

    try_jump(&mut spirit, &tuning, &catalog, &mut rng.0, &mut pending);
}

pub(crate) fn try_jump(
    spirit: &mut Spirit,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    rng: &mut impl Rng,
    pending: &mut PendingActions,
) -> bool {
    if !spirit.state.is_locomotion() {
        return false;
    }
    if !rng.random_bool(tuning.jump_chance) {
        return false;
    }
    if spirit.request_state(SpiritState::Jump, catalog) != TransitionOutcome::Applied {
        return false;
    }
    pending.schedule(
        tuning.jump_revert_delay,
        Guard::StateIs(SpiritState::Jump),
        DeferredKind::RevertToPrevious,
    );
    true
}

pub(crate) fn tick_climb_trigger(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut clocks: ResMut<BehaviorClocks>,
    mut rng: ResMut<SpiritRng>,
    monitors: Query<&Monitor>,
    mut spirits: Query<(&mut Spirit, &ScreenPosition)>,
) {
    let Ok((mut spirit, position)) = spirits.single_mut() else {
        return;
    };
    if spirit.locked {
        return;
    }
    if !clocks.climb_check.tick(time.delta()).just_finished() {
        return;
    }

    let rect = screen_rect_at(&monitors, position.as_vec2());
    try_climb(
        &mut spirit,
        position,
        &rect,
        &tuning,
        &catalog,
        &mut rng.0,
        catalog.frame_size_vec2(),
    );
}

/// Start the exclusive climb sequence when idling or patrolling against a
/// screen edge.
pub(crate) fn try_climb(
    spirit: &mut Spirit,
    position: &ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    rng: &mut impl Rng,
    frame: Vec2,
) -> bool {
    if !matches!(
        spirit.state,
        SpiritState::Walk | SpiritState::Run | SpiritState::Idle | SpiritState::Hurt
    ) {
        return false;
    }
    if !rect.at_left_edge(position.x) && !rect.at_right_edge(position.x, frame.x) {
        return false;
    }
    if !rng.random_bool(tuning.climb_chance) {
        return false;
    }
    if spirit.request_state(SpiritState::Climb, catalog) != TransitionOutcome::Applied {
        return false;
    }

    spirit.locked = true;
    spirit.mode = MovementMode::ClimbingUp;
    true
}

// -----------------------------------------------------------------------------
// Climb sequence
// -----------------------------------------------------------------------------

pub(crate) fn tick_climb_sequence(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut clocks: ResMut<BehaviorClocks>,
    mut rng: ResMut<SpiritRng>,
    monitors: Query<&Monitor>,
    mut spirits: Query<(&mut Spirit, &mut ScreenPosition)>,
) {
    let Ok((mut spirit, mut position)) = spirits.single_mut() else {
        return;
    };
    if !matches!(
        spirit.mode,
        MovementMode::ClimbingUp | MovementMode::ClimbingDown
    ) {
        return;
    }
    if !clocks.climb_step.tick(time.delta()).just_finished() {
        return;
    }

    let rect = screen_rect_at(&monitors, position.as_vec2());
    let frame = catalog.frame_size_vec2();
    match spirit.mode {
        MovementMode::ClimbingUp => climb_up_step(
            &mut spirit,
            &mut position,
            &rect,
            &tuning,
            &mut rng.0,
            frame,
        ),
        MovementMode::ClimbingDown => {
            climb_down_step(&mut spirit, &mut position, &rect, &tuning, &catalog, frame)
        }
        _ => {}
    }
}

fn climb_wall_x(spirit: &Spirit, rect: &ScreenRect, frame_width: f32) -> f32 {
    match spirit.direction {
        super::Direction::Left => rect.left,
        super::Direction::Right => rect.right - frame_width,
    }
}

/// One upward climb step. At the top the spirit either lets go and falls
/// or turns around and climbs back down.
pub(crate) fn climb_up_step(
    spirit: &mut Spirit,
    position: &mut ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    rng: &mut impl Rng,
    frame: Vec2,
) {
    position.x = climb_wall_x(spirit, rect, frame.x);
    let next = position.y - tuning.climb_step;
    if next > rect.top {
        position.y = next;
        return;
    }

    position.y = rect.top;
    if rng.random_bool(tuning.fall_after_climb_chance) {
        begin_fall(spirit, position);
    } else {
        spirit.mode = MovementMode::ClimbingDown;
    }
}

/// One downward climb step; unlocks and resumes walking near the ground.
pub(crate) fn climb_down_step(
    spirit: &mut Spirit,
    position: &mut ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    frame: Vec2,
) {
    position.x = climb_wall_x(spirit, rect, frame.x);
    let next = position.y + tuning.climb_step;
    let ground = rect.ground_y(frame.y, tuning.ground_margin);
    if next < ground {
        position.y = next;
        return;
    }

    position.y = ground;
    unlock_and_resume(spirit, catalog);
}

/// Start the exclusive fall. The whole fall stays locked until it
/// resolves to death or hurt.
pub(crate) fn begin_fall(spirit: &mut Spirit, position: &ScreenPosition) {
    spirit.locked = true;
    spirit.mode = MovementMode::Falling;
    spirit.fall_start_y = position.y;
}

pub(crate) fn unlock_and_resume(spirit: &mut Spirit, catalog: &AnimationCatalog) {
    spirit.locked = false;
    spirit.mode = MovementMode::None;
    spirit.request_state(SpiritState::Walk, catalog);
}

// -----------------------------------------------------------------------------
// Fall sequence
// -----------------------------------------------------------------------------

pub(crate) fn tick_fall_sequence(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut clocks: ResMut<BehaviorClocks>,
    monitors: Query<&Monitor>,
    mut spirits: Query<(&mut Spirit, &mut ScreenPosition)>,
    mut damage: MessageWriter<DamageEvent>,
    mut death: MessageWriter<DeathRequested>,
) {
    let Ok((mut spirit, mut position)) = spirits.single_mut() else {
        return;
    };
    if spirit.mode != MovementMode::Falling {
        return;
    }
    if !clocks.fall_step.tick(time.delta()).just_finished() {
        return;
    }

    let rect = screen_rect_at(&monitors, position.as_vec2());
    match fall_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        catalog.frame_size_vec2(),
    ) {
        FallOutcome::Continuing => {}
        FallOutcome::FatalLanding => {
            death.write(DeathRequested {
                cause: DamageCause::Fall,
            });
        }
        FallOutcome::Landing => {
            damage.write(DamageEvent {
                amount: 1,
                cause: DamageCause::Fall,
            });
        }
    }
}

/// One downward fall step. On touchdown the total drop decides between a
/// fatal landing and a survivable one; the lock is released by whichever
/// resolution follows.
pub(crate) fn fall_step(
    spirit: &mut Spirit,
    position: &mut ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    frame: Vec2,
) -> FallOutcome {
    position.y += tuning.fall_step;
    let ground = rect.ground_y(frame.y, tuning.ground_margin);
    if position.y < ground {
        return FallOutcome::Continuing;
    }

    position.y = ground;
    spirit.mode = MovementMode::None;
    let dropped = position.y - spirit.fall_start_y;
    if dropped > rect.height() / 2.0 {
        FallOutcome::FatalLanding
    } else {
        FallOutcome::Landing
    }
}

// -----------------------------------------------------------------------------
// Damage resolution and death
// -----------------------------------------------------------------------------

/// Applies death requests first, then the hurt paths for survived damage.
/// Death always preempts a hurt queued in the same batch.
pub(crate) fn resolve_damage(
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut deaths: MessageReader<DeathRequested>,
    mut resolved: MessageReader<DamageResolved>,
    mut spirits: Query<&mut Spirit>,
    mut pending: ResMut<PendingActions>,
) {
    let Ok(mut spirit) = spirits.single_mut() else {
        return;
    };

    for request in deaths.read() {
        force_death(&mut spirit, &tuning, &catalog, &mut pending, request.cause);
    }

    for event in resolved.read() {
        let DamageOutcome::Damaged { .. } = event.outcome else {
            continue;
        };
        if spirit.is_dying() || spirit.state == SpiritState::Hurt {
            continue;
        }
        match event.cause {
            DamageCause::Click | DamageCause::Fall => {
                enter_hurt_recovery(&mut spirit, &tuning, &catalog, &mut pending);
            }
            // The edge bounce already showed the hurt animation.
            DamageCause::Exhaustion => {}
        }
    }
}

/// Survived a click or a fall: unlock once, flinch, and return to the
/// pre-hurt locomotion state shortly after.
pub(crate) fn enter_hurt_recovery(
    spirit: &mut Spirit,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    pending: &mut PendingActions,
) {
    spirit.locked = false;
    spirit.mode = MovementMode::None;
    if spirit.request_state(SpiritState::Hurt, catalog) != TransitionOutcome::Applied {
        return;
    }
    let back = if spirit.previous_state.is_locomotion() {
        spirit.previous_state
    } else {
        SpiritState::Walk
    };
    pending.schedule(
        tuning.hurt_revert_delay,
        Guard::UnlockedAndStateIs(SpiritState::Hurt),
        DeferredKind::Request(back),
    );
}

/// The one forced transition: bypasses the lock, halts movement, and
/// schedules the respawn. Exactly once per reach-zero or fatal fall.
pub(crate) fn force_death(
    spirit: &mut Spirit,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    pending: &mut PendingActions,
    cause: DamageCause,
) {
    if spirit.is_dying() {
        return;
    }

    spirit.mode = MovementMode::None;
    spirit.request_state(SpiritState::Death, catalog);
    spirit.locked = true;

    let delay = if cause == DamageCause::Fall {
        tuning.fall_death_reset_delay
    } else {
        tuning.death_reset_delay
    };
    info!("spirit died ({:?}), respawning in {:.1}s", cause, delay);
    pending.schedule(delay, Guard::Always, DeferredKind::Reset);
}

/// Respawn at a random edge on the ground line, walking inward.
pub(crate) fn reset_spirit(
    spirit: &mut Spirit,
    position: &mut ScreenPosition,
    rect: &ScreenRect,
    tuning: &SpiritTuning,
    catalog: &AnimationCatalog,
    rng: &mut impl Rng,
    frame: Vec2,
) {
    spirit.locked = false;
    spirit.mode = MovementMode::None;
    spirit.can_attack = true;
    spirit.direction = if rng.random_bool(0.5) {
        super::Direction::Left
    } else {
        super::Direction::Right
    };
    position.x = match spirit.direction {
        super::Direction::Right => rect.left,
        super::Direction::Left => rect.right - frame.x,
    };
    position.y = rect.ground_y(frame.y, tuning.ground_margin);
    spirit.request_state(SpiritState::Walk, catalog);
    info!(
        "respawned at ({:.0}, {:.0}) heading {:?}",
        position.x, position.y, spirit.direction
    );
}

// -----------------------------------------------------------------------------
// Recovery
// -----------------------------------------------------------------------------

/// Cosmetic transition after a full heal: a short idle, then back to walk.
pub(crate) fn handle_recovery(
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut recovered: MessageReader<Recovered>,
    mut spirits: Query<&mut Spirit>,
    mut pending: ResMut<PendingActions>,
) {
    let Ok(mut spirit) = spirits.single_mut() else {
        return;
    };
    for _ in recovered.read() {
        if spirit.locked {
            continue;
        }
        if spirit.request_state(SpiritState::Idle, &catalog) == TransitionOutcome::Applied {
            pending.schedule(
                tuning.recover_walk_delay,
                Guard::UnlockedAndStateIs(SpiritState::Idle),
                DeferredKind::Request(SpiritState::Walk),
            );
        }
    }
}

// -----------------------------------------------------------------------------
// Deferred-action runner
// -----------------------------------------------------------------------------

pub(crate) fn run_deferred_actions(
    time: Res<Time>,
    tuning: Res<SpiritTuning>,
    catalog: Res<AnimationCatalog>,
    mut rng: ResMut<SpiritRng>,
    monitors: Query<&Monitor>,
    mut spirits: Query<(&mut Spirit, &mut ScreenPosition)>,
    mut pending: ResMut<PendingActions>,
    mut resets: MessageWriter<SpiritReset>,
) {
    let Ok((mut spirit, mut position)) = spirits.single_mut() else {
        return;
    };

    for action in pending.tick(time.delta()) {
        if !action.guard.passes(&spirit) {
            debug!("stale deferred {:?} dropped", action.kind);
            continue;
        }
        match action.kind {
            DeferredKind::Request(state) => {
                spirit.request_state(state, &catalog);
            }
            DeferredKind::RevertToPrevious => {
                let back = spirit.previous_state;
                spirit.request_state(back, &catalog);
            }
            DeferredKind::FlipAndContinue(next) => {
                spirit.direction = spirit.direction.flipped();
                spirit.request_state(next, &catalog);
            }
            DeferredKind::EnableAttack => {
                spirit.can_attack = true;
            }
            DeferredKind::Reset => {
                let rect = screen_rect_at(&monitors, position.as_vec2());
                reset_spirit(
                    &mut spirit,
                    &mut position,
                    &rect,
                    &tuning,
                    &catalog,
                    &mut rng.0,
                    catalog.frame_size_vec2(),
                );
                resets.write(SpiritReset);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

/// Request with a bounded fallback: if the clip is missing, retry Walk
/// after a short delay instead of leaving the spirit wedged.
pub(crate) fn safe_request(
    spirit: &mut Spirit,
    target: SpiritState,
    catalog: &AnimationCatalog,
    tuning: &SpiritTuning,
    pending: &mut PendingActions,
) -> TransitionOutcome {
    let outcome = spirit.request_state(target, catalog);
    if outcome == TransitionOutcome::MissingClip {
        pending.schedule(
            tuning.retry_fallback_delay,
            Guard::Unlocked,
            DeferredKind::Request(SpiritState::Walk),
        );
    }
    outcome
}
