//! Behavior domain: the spirit record and its transition contract.

use bevy::prelude::*;

use crate::catalog::AnimationCatalog;

/// Closed set of animation states. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpiritState {
    Idle,
    #[default]
    Walk,
    Run,
    Jump,
    Hurt,
    Climb,
    Death,
    Attack1,
    Attack2,
    WalkAttack,
}

impl SpiritState {
    pub const ALL: [SpiritState; 10] = [
        SpiritState::Idle,
        SpiritState::Walk,
        SpiritState::Run,
        SpiritState::Jump,
        SpiritState::Hurt,
        SpiritState::Climb,
        SpiritState::Death,
        SpiritState::Attack1,
        SpiritState::Attack2,
        SpiritState::WalkAttack,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Manifest key for this state's clip.
    pub fn name(self) -> &'static str {
        match self {
            SpiritState::Idle => "idle",
            SpiritState::Walk => "walk",
            SpiritState::Run => "run",
            SpiritState::Jump => "jump",
            SpiritState::Hurt => "hurt",
            SpiritState::Climb => "climb",
            SpiritState::Death => "death",
            SpiritState::Attack1 => "attack1",
            SpiritState::Attack2 => "attack2",
            SpiritState::WalkAttack => "walk_attack",
        }
    }

    pub fn from_name(name: &str) -> Option<SpiritState> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Walk and Run are the only states with continuous horizontal movement.
    pub fn is_locomotion(self) -> bool {
        matches!(self, SpiritState::Walk | SpiritState::Run)
    }

    /// Transient states are entered briefly and automatically reverted;
    /// they are never recorded as a restore target.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            SpiritState::Jump
                | SpiritState::Hurt
                | SpiritState::Attack1
                | SpiritState::Attack2
                | SpiritState::WalkAttack
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Which sequence currently owns position updates. Single source of truth
/// for movement ownership; at most one exclusive sequence at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    #[default]
    None,
    Patrol,
    ClimbingUp,
    ClimbingDown,
    Falling,
    Dragging,
}

/// Top-left window position in screen coordinates, y growing downward.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    /// Blocked by the lock; only Death bypasses it.
    LockedOut,
    /// The catalog has no clip for the target state.
    MissingClip,
}

#[derive(Component, Debug)]
pub struct Spirit {
    pub state: SpiritState,
    /// Restore target after a transient state completes. Never transient
    /// itself: only non-transient states are recorded.
    pub previous_state: SpiritState,
    pub direction: Direction,
    /// Blocks all transitions except the forced Death transition. This is
    /// ordinary state, not a synchronization primitive.
    pub locked: bool,
    /// Attack cooldown gate, independent of `locked`.
    pub can_attack: bool,
    pub mode: MovementMode,
    /// Where the current fall began, for drop-distance accounting.
    pub fall_start_y: f32,
    /// Bumped on every applied transition so presentation re-applies the
    /// clip and cadence, including re-requests of the current state.
    pub epoch: u64,
}

impl Default for Spirit {
    fn default() -> Self {
        Self {
            state: SpiritState::Walk,
            previous_state: SpiritState::Walk,
            direction: Direction::Right,
            locked: false,
            can_attack: true,
            mode: MovementMode::Patrol,
            fall_start_y: 0.0,
            epoch: 0,
        }
    }
}

impl Spirit {
    /// The transition contract. Every state change goes through here.
    ///
    /// Rejected while locked unless the target is Death, and when the
    /// catalog has no clip for the target (logged, prior state kept).
    /// On acceptance the restore target is updated only from non-transient
    /// states, the epoch is bumped, and patrol ownership follows the
    /// target: locomotion states own movement, everything else stops it.
    pub fn request_state(
        &mut self,
        target: SpiritState,
        catalog: &AnimationCatalog,
    ) -> TransitionOutcome {
        if self.locked && target != SpiritState::Death {
            debug!(
                "transition to '{}' blocked while locked in '{}'",
                target.name(),
                self.state.name()
            );
            return TransitionOutcome::LockedOut;
        }

        if !catalog.has_clip(target) {
            warn!(
                "no clip loaded for '{}', staying in '{}'",
                target.name(),
                self.state.name()
            );
            return TransitionOutcome::MissingClip;
        }

        if !self.state.is_transient() {
            self.previous_state = self.state;
        }
        self.state = target;
        self.epoch += 1;

        match target {
            SpiritState::Walk | SpiritState::Run => self.mode = MovementMode::Patrol,
            _ => {
                if self.mode == MovementMode::Patrol {
                    self.mode = MovementMode::None;
                }
            }
        }

        TransitionOutcome::Applied
    }

    pub fn is_dying(&self) -> bool {
        self.state == SpiritState::Death
    }
}
