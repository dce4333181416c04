//! Behavior domain: repeating tick clocks.

use bevy::prelude::*;

use crate::core::SpiritTuning;

/// One repeating clock per periodic concern. Systems gate on the lock and
/// movement mode before ticking, so a clock is effectively suspended while
/// something exclusive owns the spirit.
#[derive(Resource, Debug)]
pub struct BehaviorClocks {
    pub movement: Timer,
    pub jump_check: Timer,
    pub climb_check: Timer,
    pub climb_step: Timer,
    pub fall_step: Timer,
}

impl BehaviorClocks {
    pub fn from_tuning(tuning: &SpiritTuning) -> Self {
        Self {
            movement: Timer::from_seconds(tuning.move_period, TimerMode::Repeating),
            jump_check: Timer::from_seconds(tuning.jump_check_period, TimerMode::Repeating),
            climb_check: Timer::from_seconds(tuning.climb_check_period, TimerMode::Repeating),
            climb_step: Timer::from_seconds(tuning.climb_step_period, TimerMode::Repeating),
            fall_step: Timer::from_seconds(tuning.fall_step_period, TimerMode::Repeating),
        }
    }
}

impl FromWorld for BehaviorClocks {
    fn from_world(world: &mut World) -> Self {
        let tuning = world.resource::<SpiritTuning>();
        Self::from_tuning(tuning)
    }
}
