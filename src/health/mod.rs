//! Domain: the spirit's health. A small hit-point pool, a heal deadline
//! that the latest damage always supersedes, and escalation to death when
//! the pool empties.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::{DamageOutcome, Health, PendingHeal};
pub use events::{DamageCause, DamageEvent, DamageResolved, Recovered};

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DamageResolved>()
            .add_message::<Recovered>()
            .add_systems(
                Update,
                (
                    systems::apply_damage_events,
                    systems::tick_heal_deadline,
                    systems::handle_reset,
                )
                    .chain(),
            );
    }
}
