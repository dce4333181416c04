//! Behavior domain: unit tests for the transition contract, patrol,
//! climb and fall sequences, death, and deferred actions.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::actions::{DeferredKind, Guard, PendingActions};
use super::components::{
    Direction, MovementMode, ScreenPosition, Spirit, SpiritState, TransitionOutcome,
};
use super::systems::{
    FallOutcome, PatrolEvent, begin_fall, climb_down_step, climb_up_step, enter_hurt_recovery,
    fall_step, force_death, patrol_step, reset_spirit, safe_request, try_climb, try_jump,
    unlock_and_resume,
};
use crate::catalog::full_test_catalog;
use crate::core::{ScreenRect, SpiritTuning};
use crate::health::DamageCause;

const FRAME: Vec2 = Vec2::new(32.0, 32.0);

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn tuning() -> SpiritTuning {
    SpiritTuning {
        jump_chance: 0.0,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Transition contract
// -----------------------------------------------------------------------------

#[test]
fn test_request_state_applies_and_bumps_epoch() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit::default();

    assert_eq!(
        spirit.request_state(SpiritState::Idle, &catalog),
        TransitionOutcome::Applied
    );
    assert_eq!(spirit.state, SpiritState::Idle);
    assert_eq!(spirit.previous_state, SpiritState::Walk);
    assert_eq!(spirit.epoch, 1);

    // Re-requesting the current state still bumps the epoch.
    spirit.request_state(SpiritState::Idle, &catalog);
    assert_eq!(spirit.epoch, 2);
}

#[test]
fn test_lock_blocks_everything_but_death() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit {
        locked: true,
        ..Default::default()
    };

    assert_eq!(
        spirit.request_state(SpiritState::Run, &catalog),
        TransitionOutcome::LockedOut
    );
    assert_eq!(spirit.state, SpiritState::Walk);

    assert_eq!(
        spirit.request_state(SpiritState::Death, &catalog),
        TransitionOutcome::Applied
    );
    assert!(spirit.is_dying());
}

#[test]
fn test_previous_state_is_never_transient() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit::default();

    spirit.request_state(SpiritState::Run, &catalog);
    spirit.request_state(SpiritState::Jump, &catalog);
    assert_eq!(spirit.previous_state, SpiritState::Run);

    // Transient to transient keeps the original restore target.
    spirit.request_state(SpiritState::Hurt, &catalog);
    assert_eq!(spirit.previous_state, SpiritState::Run);

    spirit.request_state(spirit.previous_state, &catalog);
    assert_eq!(spirit.state, SpiritState::Run);
}

#[test]
fn test_locomotion_owns_patrol_mode() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit::default();
    assert_eq!(spirit.mode, MovementMode::Patrol);

    spirit.request_state(SpiritState::Idle, &catalog);
    assert_eq!(spirit.mode, MovementMode::None);

    spirit.request_state(SpiritState::Run, &catalog);
    assert_eq!(spirit.mode, MovementMode::Patrol);
}

#[test]
fn test_missing_clip_keeps_state_and_safe_request_schedules_fallback() {
    let mut catalog = full_test_catalog();
    catalog.remove_clip(SpiritState::Climb);
    let tuning = tuning();
    let mut spirit = Spirit::default();
    let mut pending = PendingActions::default();

    let outcome = safe_request(
        &mut spirit,
        SpiritState::Climb,
        &catalog,
        &tuning,
        &mut pending,
    );
    assert_eq!(outcome, TransitionOutcome::MissingClip);
    assert_eq!(spirit.state, SpiritState::Walk);
    assert_eq!(pending.len(), 1);

    let fired = pending.tick(Duration::from_secs_f32(tuning.retry_fallback_delay + 0.01));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::Request(SpiritState::Walk));
    assert_eq!(fired[0].guard, Guard::Unlocked);
}

// -----------------------------------------------------------------------------
// Patrol
// -----------------------------------------------------------------------------

#[test]
fn test_patrol_translates_at_state_speed() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(100.0, 0.0);
    patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );
    assert_eq!(position.x, 100.0 + tuning.walk_step);
    assert_eq!(position.y, rect.ground_y(FRAME.y, tuning.ground_margin));

    spirit.request_state(SpiritState::Run, &catalog);
    patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );
    assert_eq!(position.x, 100.0 + tuning.walk_step + tuning.run_step);
}

#[test]
fn test_patrol_ignores_non_locomotion_states() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Idle, &catalog);
    let mut position = ScreenPosition::new(100.0, 200.0);
    let event = patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );
    assert_eq!(event, PatrolEvent::None);
    assert_eq!(position.x, 100.0);
}

#[test]
fn test_walker_rests_at_edge_then_sprints_back() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(rect.right - FRAME.x - 1.0, 0.0);
    let event = patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );

    assert_eq!(event, PatrolEvent::EdgeFlip { hurt: false });
    assert_eq!(spirit.state, SpiritState::Idle);
    assert_eq!(spirit.mode, MovementMode::None);
    assert_eq!(position.x, rect.right - FRAME.x);

    let fired = pending.tick(Duration::from_secs_f32(tuning.flip_pause + 0.01));
    assert_eq!(fired.len(), 1);
    assert_eq!(
        fired[0].kind,
        DeferredKind::FlipAndContinue(SpiritState::Run)
    );
}

#[test]
fn test_runner_smarts_at_edge_then_walks_back() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit {
        direction: Direction::Left,
        ..Default::default()
    };
    spirit.request_state(SpiritState::Run, &catalog);
    let mut position = ScreenPosition::new(rect.left + 2.0, 0.0);
    let event = patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );

    assert_eq!(event, PatrolEvent::EdgeFlip { hurt: true });
    assert_eq!(spirit.state, SpiritState::Hurt);
    assert_eq!(position.x, rect.left);
    assert_eq!(
        pending.iter().next().map(|a| a.kind),
        Some(DeferredKind::FlipAndContinue(SpiritState::Walk))
    );
}

#[test]
fn test_midpoint_jump_detour() {
    let catalog = full_test_catalog();
    let tuning = SpiritTuning {
        jump_chance: 1.0,
        ..Default::default()
    };
    let rect = ScreenRect::default();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(rect.mid_x() - tuning.walk_step, 0.0);
    let event = patrol_step(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending,
        FRAME,
    );

    assert_eq!(event, PatrolEvent::JumpDetour);
    assert_eq!(spirit.state, SpiritState::Jump);
    assert_eq!(
        pending.iter().next().map(|a| (a.guard, a.kind)),
        Some((
            Guard::StateIs(SpiritState::Jump),
            DeferredKind::RevertToPrevious
        ))
    );
}

// -----------------------------------------------------------------------------
// Jump trigger
// -----------------------------------------------------------------------------

#[test]
fn test_jump_roll_respects_probability_extremes() {
    let catalog = full_test_catalog();
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let never = SpiritTuning {
        jump_chance: 0.0,
        ..Default::default()
    };
    let mut spirit = Spirit::default();
    assert!(!try_jump(&mut spirit, &never, &catalog, &mut rng, &mut pending));
    assert_eq!(spirit.state, SpiritState::Walk);

    let always = SpiritTuning {
        jump_chance: 1.0,
        ..Default::default()
    };
    assert!(try_jump(&mut spirit, &always, &catalog, &mut rng, &mut pending));
    assert_eq!(spirit.state, SpiritState::Jump);
    assert_eq!(pending.len(), 1);
}

#[test]
fn test_jump_requires_locomotion() {
    let catalog = full_test_catalog();
    let tuning = SpiritTuning {
        jump_chance: 1.0,
        ..Default::default()
    };
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Idle, &catalog);
    assert!(!try_jump(
        &mut spirit,
        &tuning,
        &catalog,
        &mut rng,
        &mut pending
    ));
}

#[test]
fn test_jump_revert_round_trip() {
    let catalog = full_test_catalog();
    let tuning = SpiritTuning {
        jump_chance: 1.0,
        ..Default::default()
    };
    let mut pending = PendingActions::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Run, &catalog);
    assert!(try_jump(&mut spirit, &tuning, &catalog, &mut rng, &mut pending));

    let fired = pending.tick(Duration::from_secs_f32(tuning.jump_revert_delay + 0.01));
    assert_eq!(fired.len(), 1);
    assert!(fired[0].guard.passes(&spirit));
    spirit.request_state(spirit.previous_state, &catalog);
    assert_eq!(spirit.state, SpiritState::Run);
    assert_eq!(spirit.mode, MovementMode::Patrol);
}

// -----------------------------------------------------------------------------
// Climb sequence
// -----------------------------------------------------------------------------

#[test]
fn test_climb_starts_only_at_an_edge() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    let middle = ScreenPosition::new(rect.mid_x(), 0.0);
    assert!(!try_climb(
        &mut spirit,
        &middle,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        FRAME
    ));

    let edge = ScreenPosition::new(rect.left, 0.0);
    assert!(try_climb(
        &mut spirit,
        &edge,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        FRAME
    ));
    assert_eq!(spirit.state, SpiritState::Climb);
    assert!(spirit.locked);
    assert_eq!(spirit.mode, MovementMode::ClimbingUp);
}

#[test]
fn test_climb_roll_can_decline() {
    let catalog = full_test_catalog();
    let tuning = SpiritTuning {
        climb_chance: 0.0,
        ..Default::default()
    };
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit::default();
    let edge = ScreenPosition::new(rect.left, 0.0);
    assert!(!try_climb(
        &mut spirit,
        &edge,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        FRAME
    ));
    assert!(!spirit.locked);
}

#[test]
fn test_climb_up_pins_to_wall_and_rises() {
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit {
        direction: Direction::Left,
        locked: true,
        mode: MovementMode::ClimbingUp,
        ..Default::default()
    };
    let mut position = ScreenPosition::new(3.0, 500.0);
    climb_up_step(&mut spirit, &mut position, &rect, &tuning, &mut rng, FRAME);

    assert_eq!(position.x, rect.left);
    assert_eq!(position.y, 500.0 - tuning.climb_step);
    assert_eq!(spirit.mode, MovementMode::ClimbingUp);
}

#[test]
fn test_top_of_climb_lets_go_when_the_roll_says_so() {
    let tuning = SpiritTuning {
        fall_after_climb_chance: 1.0,
        ..Default::default()
    };
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit {
        locked: true,
        mode: MovementMode::ClimbingUp,
        ..Default::default()
    };
    let mut position = ScreenPosition::new(rect.right - FRAME.x, rect.top + 2.0);
    climb_up_step(&mut spirit, &mut position, &rect, &tuning, &mut rng, FRAME);

    assert_eq!(position.y, rect.top);
    assert_eq!(spirit.mode, MovementMode::Falling);
    assert!(spirit.locked);
    assert_eq!(spirit.fall_start_y, rect.top);
}

#[test]
fn test_top_of_climb_turns_around_otherwise() {
    let tuning = SpiritTuning {
        fall_after_climb_chance: 0.0,
        ..Default::default()
    };
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit {
        locked: true,
        mode: MovementMode::ClimbingUp,
        ..Default::default()
    };
    let mut position = ScreenPosition::new(rect.right - FRAME.x, rect.top + 2.0);
    climb_up_step(&mut spirit, &mut position, &rect, &tuning, &mut rng, FRAME);

    assert_eq!(spirit.mode, MovementMode::ClimbingDown);
    assert!(spirit.locked);
}

#[test]
fn test_climb_down_lands_and_resumes_walking() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let ground = rect.ground_y(FRAME.y, tuning.ground_margin);

    let mut spirit = Spirit {
        locked: true,
        mode: MovementMode::ClimbingDown,
        ..Default::default()
    };
    spirit.state = SpiritState::Climb;

    let mut position = ScreenPosition::new(rect.right - FRAME.x, ground - 2.0);
    climb_down_step(&mut spirit, &mut position, &rect, &tuning, &catalog, FRAME);

    assert_eq!(position.y, ground);
    assert!(!spirit.locked);
    assert_eq!(spirit.state, SpiritState::Walk);
    assert_eq!(spirit.mode, MovementMode::Patrol);
}

// -----------------------------------------------------------------------------
// Fall sequence
// -----------------------------------------------------------------------------

#[test]
fn test_short_fall_lands_survivably() {
    let tuning = tuning();
    let rect = ScreenRect::default();
    let ground = rect.ground_y(FRAME.y, tuning.ground_margin);

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(300.0, ground - 100.0);
    begin_fall(&mut spirit, &position);
    assert!(spirit.locked);

    let mut outcome = FallOutcome::Continuing;
    for _ in 0..100 {
        outcome = fall_step(&mut spirit, &mut position, &rect, &tuning, FRAME);
        if outcome != FallOutcome::Continuing {
            break;
        }
    }
    assert_eq!(outcome, FallOutcome::Landing);
    assert_eq!(position.y, ground);
    assert_eq!(spirit.mode, MovementMode::None);
}

#[test]
fn test_long_fall_is_fatal() {
    let tuning = tuning();
    let rect = ScreenRect::default();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(300.0, rect.top);
    begin_fall(&mut spirit, &position);

    let mut outcome = FallOutcome::Continuing;
    for _ in 0..1000 {
        outcome = fall_step(&mut spirit, &mut position, &rect, &tuning, FRAME);
        if outcome != FallOutcome::Continuing {
            break;
        }
    }
    assert_eq!(outcome, FallOutcome::FatalLanding);
}

#[test]
fn test_fall_stays_locked_until_touchdown() {
    let tuning = tuning();
    let rect = ScreenRect::default();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(300.0, 400.0);
    begin_fall(&mut spirit, &position);

    fall_step(&mut spirit, &mut position, &rect, &tuning, FRAME);
    assert!(spirit.locked);
    assert_eq!(spirit.mode, MovementMode::Falling);
}

// -----------------------------------------------------------------------------
// Hurt, death, reset
// -----------------------------------------------------------------------------

#[test]
fn test_hurt_recovery_returns_to_prior_locomotion() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let mut pending = PendingActions::default();

    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Run, &catalog);
    enter_hurt_recovery(&mut spirit, &tuning, &catalog, &mut pending);

    assert_eq!(spirit.state, SpiritState::Hurt);
    let fired = pending.tick(Duration::from_secs_f32(tuning.hurt_revert_delay + 0.01));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::Request(SpiritState::Run));
    assert!(fired[0].guard.passes(&spirit));
}

#[test]
fn test_hurt_recovery_falls_back_to_walk() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let mut pending = PendingActions::default();

    // Climbing then clicked: the restore target is Climb, not locomotion.
    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Climb, &catalog);
    spirit.locked = true;
    enter_hurt_recovery(&mut spirit, &tuning, &catalog, &mut pending);

    assert!(!spirit.locked);
    assert_eq!(spirit.state, SpiritState::Hurt);
    assert_eq!(
        pending.iter().next().map(|a| a.kind),
        Some(DeferredKind::Request(SpiritState::Walk))
    );
}

#[test]
fn test_force_death_bypasses_lock_and_is_idempotent() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let mut pending = PendingActions::default();

    let mut spirit = Spirit {
        locked: true,
        mode: MovementMode::Falling,
        ..Default::default()
    };
    force_death(
        &mut spirit,
        &tuning,
        &catalog,
        &mut pending,
        DamageCause::Fall,
    );
    assert!(spirit.is_dying());
    assert!(spirit.locked);
    assert_eq!(spirit.mode, MovementMode::None);
    assert_eq!(pending.len(), 1);

    // A second request while already dying schedules nothing.
    force_death(
        &mut spirit,
        &tuning,
        &catalog,
        &mut pending,
        DamageCause::Click,
    );
    assert_eq!(pending.len(), 1);
}

#[test]
fn test_fall_death_uses_shorter_reset_delay() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let mut pending = PendingActions::default();

    let mut spirit = Spirit::default();
    force_death(
        &mut spirit,
        &tuning,
        &catalog,
        &mut pending,
        DamageCause::Fall,
    );

    // Fires at the fall delay, well before the ordinary death delay.
    let fired = pending.tick(Duration::from_secs_f32(
        tuning.fall_death_reset_delay + 0.01,
    ));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::Reset);
    assert_eq!(fired[0].guard, Guard::Always);
}

#[test]
fn test_reset_respawns_on_the_ground_walking() {
    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut rng = rng();

    let mut spirit = Spirit {
        locked: true,
        can_attack: false,
        ..Default::default()
    };
    spirit.state = SpiritState::Death;
    let mut position = ScreenPosition::new(500.0, 200.0);

    reset_spirit(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        FRAME,
    );

    assert!(!spirit.locked);
    assert!(spirit.can_attack);
    assert_eq!(spirit.state, SpiritState::Walk);
    assert_eq!(spirit.mode, MovementMode::Patrol);
    assert_eq!(position.y, rect.ground_y(FRAME.y, tuning.ground_margin));
    assert!(position.x == rect.left || position.x == rect.right - FRAME.x);
}

#[test]
fn test_draining_health_ends_in_death_then_respawn() {
    use crate::health::{DamageOutcome, Health};

    let catalog = full_test_catalog();
    let tuning = tuning();
    let rect = ScreenRect::default();
    let mut rng = rng();
    let mut pending = PendingActions::default();

    let mut spirit = Spirit::default();
    let mut position = ScreenPosition::new(400.0, 0.0);
    let mut health = Health::new(5);

    for n in 1..=5 {
        match health.apply_damage(1) {
            DamageOutcome::Damaged { remaining } => assert_eq!(remaining, 5 - n),
            DamageOutcome::ReachedZero => {
                assert_eq!(n, 5);
                force_death(&mut spirit, &tuning, &catalog, &mut pending, DamageCause::Click);
            }
            DamageOutcome::AlreadyDead => panic!("pool drained early"),
        }
    }
    assert!(spirit.is_dying());

    let fired = pending.tick(Duration::from_secs_f32(tuning.death_reset_delay + 0.01));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::Reset);

    reset_spirit(
        &mut spirit,
        &mut position,
        &rect,
        &tuning,
        &catalog,
        &mut rng,
        FRAME,
    );
    health.restore();
    assert_eq!(spirit.state, SpiritState::Walk);
    assert_eq!(health.current, 5);
}

#[test]
fn test_unlock_and_resume() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit {
        locked: true,
        mode: MovementMode::ClimbingDown,
        ..Default::default()
    };
    spirit.state = SpiritState::Climb;

    unlock_and_resume(&mut spirit, &catalog);
    assert!(!spirit.locked);
    assert_eq!(spirit.state, SpiritState::Walk);
    assert_eq!(spirit.mode, MovementMode::Patrol);
}

// -----------------------------------------------------------------------------
// Deferred actions
// -----------------------------------------------------------------------------

#[test]
fn test_deferred_actions_fire_at_their_own_delays() {
    let mut pending = PendingActions::default();
    pending.schedule(0.5, Guard::Always, DeferredKind::EnableAttack);
    pending.schedule(1.0, Guard::Always, DeferredKind::Reset);

    let fired = pending.tick(Duration::from_millis(600));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::EnableAttack);
    assert_eq!(pending.len(), 1);

    let fired = pending.tick(Duration::from_millis(600));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].kind, DeferredKind::Reset);
    assert!(pending.is_empty());
}

#[test]
fn test_stale_guard_drops_the_action() {
    let spirit = Spirit {
        locked: true,
        ..Default::default()
    };

    assert!(!Guard::Unlocked.passes(&spirit));
    assert!(!Guard::UnlockedAndStateIs(SpiritState::Walk).passes(&spirit));
    assert!(Guard::StateIs(SpiritState::Walk).passes(&spirit));
    assert!(Guard::Always.passes(&spirit));
}

#[test]
fn test_state_guard_tracks_the_current_state() {
    let catalog = full_test_catalog();
    let mut spirit = Spirit::default();
    spirit.request_state(SpiritState::Jump, &catalog);
    assert!(Guard::StateIs(SpiritState::Jump).passes(&spirit));

    // The world moved on before the timer fired.
    spirit.request_state(SpiritState::Idle, &catalog);
    assert!(!Guard::StateIs(SpiritState::Jump).passes(&spirit));
}
