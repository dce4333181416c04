//! Deferred one-shot actions with re-validated guards.
//!
//! Every "wait N ms then do X" is a data record in this queue rather than
//! a closure capturing state. The runner re-checks the guard when the
//! timer fires, so an action scheduled against a world that has since
//! moved on degrades to a logged no-op.

use bevy::prelude::*;
use std::time::Duration;

use super::components::{Spirit, SpiritState};

/// Precondition re-validated at fire time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    Unlocked,
    StateIs(SpiritState),
    UnlockedAndStateIs(SpiritState),
}

impl Guard {
    pub fn passes(self, spirit: &Spirit) -> bool {
        match self {
            Guard::Always => true,
            Guard::Unlocked => !spirit.locked,
            Guard::StateIs(state) => spirit.state == state,
            Guard::UnlockedAndStateIs(state) => !spirit.locked && spirit.state == state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// Ordinary guarded state request.
    Request(SpiritState),
    /// Request whatever the restore target holds when the timer fires.
    RevertToPrevious,
    /// Flip direction, then continue in the given locomotion state.
    FlipAndContinue(SpiritState),
    /// Restore the attack cooldown gate.
    EnableAttack,
    /// Respawn after the death animation has played out.
    Reset,
}

#[derive(Debug)]
pub struct DeferredAction {
    pub timer: Timer,
    pub guard: Guard,
    pub kind: DeferredKind,
}

/// Queue of pending one-shot actions.
#[derive(Resource, Debug, Default)]
pub struct PendingActions(Vec<DeferredAction>);

impl PendingActions {
    pub fn schedule(&mut self, delay: f32, guard: Guard, kind: DeferredKind) {
        self.0.push(DeferredAction {
            timer: Timer::from_seconds(delay, TimerMode::Once),
            guard,
            kind,
        });
    }

    /// Tick all timers and drain the actions whose delay has elapsed, in
    /// scheduling order.
    pub fn tick(&mut self, delta: Duration) -> Vec<DeferredAction> {
        for action in &mut self.0 {
            action.timer.tick(delta);
        }
        let (fired, waiting): (Vec<_>, Vec<_>) = self
            .0
            .drain(..)
            .partition(|action| action.timer.is_finished());
        self.0 = waiting;
        fired
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeferredAction> {
        self.0.iter()
    }
}
