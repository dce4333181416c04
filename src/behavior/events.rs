//! Behavior domain: cross-domain messages.

use bevy::ecs::message::Message;

use crate::health::DamageCause;

/// Forces the death sequence past the lock. Idempotent at the receiver:
/// an already-dying spirit ignores further requests.
#[derive(Debug)]
pub struct DeathRequested {
    pub cause: DamageCause,
}

impl Message for DeathRequested {}

/// Emitted when the spirit respawns so other domains restore their slice
/// of the record (health back to max, heal deadline cleared).
#[derive(Debug)]
pub struct SpiritReset;

impl Message for SpiritReset {}
