//! Domain: pointer interaction. Hover provokes an attack, a quick click
//! pokes for damage, and a longer press carries the spirit around and
//! drops it into a fall.

use bevy::prelude::*;

pub mod components;
pub mod systems;


pub use components::{Attention, DragState, ReleaseKind, classify_release};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Attention>()
            .init_resource::<DragState>()
            .add_systems(
                Update,
                (systems::handle_cursor_attention, systems::handle_drag).chain(),
            );
    }
}
