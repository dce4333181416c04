//! Health domain: damage and recovery messages.

use bevy::ecs::message::Message;

use super::components::DamageOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    /// Quick pointer click on the spirit.
    Click,
    /// Landing a survivable fall, or a fatal one past half the screen.
    Fall,
    /// Running full tilt into a screen edge.
    Exhaustion,
}

#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub amount: u32,
    pub cause: DamageCause,
}

impl Message for DamageEvent {}

/// Result of applying a damage event, for the behavior domain to react to.
#[derive(Debug, Clone, Copy)]
pub struct DamageResolved {
    pub cause: DamageCause,
    pub outcome: DamageOutcome,
}

impl Message for DamageResolved {}

/// The heal deadline expired and health is back to max.
#[derive(Debug)]
pub struct Recovered;

impl Message for Recovered {}
