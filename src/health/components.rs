//! Health domain: hit points and the superseding heal deadline.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Damaged { remaining: u32 },
    ReachedZero,
    /// Damage against an empty pool is dropped.
    AlreadyDead,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.current == 0 {
            return DamageOutcome::AlreadyDead;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            DamageOutcome::ReachedZero
        } else {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        }
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Deadline to a full heal. Re-arming replaces the running deadline, so
/// only the latest damage event's timer counts.
#[derive(Component, Debug, Default)]
pub struct PendingHeal(Option<Timer>);

impl PendingHeal {
    pub fn arm(&mut self, delay: f32) {
        self.0 = Some(Timer::from_seconds(delay, TimerMode::Once));
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    pub fn remaining_secs(&self) -> Option<f32> {
        self.0.as_ref().map(|t| t.remaining_secs())
    }

    /// Tick the deadline; true exactly once, when it expires.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = &mut self.0 else {
            return false;
        };
        if timer.tick(delta).just_finished() {
            self.0 = None;
            true
        } else {
            false
        }
    }
}
