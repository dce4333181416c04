//! Domain: the spirit's autonomous behavior. State machine, patrol
//! movement, periodic jump and climb triggers, the exclusive climb and
//! fall sequences, damage resolution, death, and respawn.

use bevy::prelude::*;

pub mod actions;
pub mod components;
pub mod events;
pub mod resources;
pub mod systems;

#[cfg(test)]
mod tests;

pub use actions::{DeferredKind, Guard, PendingActions};
pub use components::{
    Direction, MovementMode, ScreenPosition, Spirit, SpiritState, TransitionOutcome,
};
pub use events::{DeathRequested, SpiritReset};
pub use resources::BehaviorClocks;

pub struct BehaviorPlugin;

impl Plugin for BehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingActions>()
            .init_resource::<BehaviorClocks>()
            .add_message::<DeathRequested>()
            .add_message::<SpiritReset>()
            .add_systems(Startup, systems::spawn_spirit)
            .add_systems(
                Update,
                (
                    systems::run_deferred_actions,
                    systems::resolve_damage,
                    systems::handle_recovery,
                    systems::tick_patrol,
                    systems::tick_jump_trigger,
                    systems::tick_climb_trigger,
                    systems::tick_climb_sequence,
                    systems::tick_fall_sequence,
                )
                    .chain(),
            );
    }
}
