mod behavior;
mod catalog;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod health;
mod interaction;
mod render;

use bevy::prelude::*;
use bevy::window::{WindowLevel, WindowPosition, WindowResolution};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Desk Spirit".to_string(),
            transparent: true,
            decorations: false,
            resizable: false,
            window_level: WindowLevel::AlwaysOnTop,
            position: WindowPosition::At(IVec2::ZERO),
            resolution: WindowResolution::new(32, 48),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::NONE))
    .add_plugins((
        core::CorePlugin,
        catalog::CatalogPlugin,
        behavior::BehaviorPlugin,
        health::HealthPlugin,
        interaction::InteractionPlugin,
        render::RenderPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
