//! Domain: the animation catalog. Loads the character manifest, validates
//! each character's clip table, picks one character for the session, and
//! exposes its clips to the rest of the app.

pub mod manifest;


use bevy::prelude::*;

use crate::behavior::SpiritState;
use crate::core::SpiritRng;
use rand::Rng;

pub use manifest::{
    CharacterDef, CharacterManifest, ClipDef, ClipValidationError, ManifestError,
    validate_character,
};

const MANIFEST_PATH: &str = "assets/sprites/manifest.json";

/// One loaded clip: strip texture plus its atlas layout.
#[derive(Debug, Clone)]
pub struct Clip {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub frames: u32,
}

/// Clips for the session's character, indexed by state.
#[derive(Resource, Debug, Default)]
pub struct AnimationCatalog {
    pub frame_size: UVec2,
    clips: [Option<Clip>; SpiritState::COUNT],
}

impl AnimationCatalog {
    pub fn insert(&mut self, state: SpiritState, clip: Clip) {
        self.clips[state.index()] = Some(clip);
    }

    pub fn clip(&self, state: SpiritState) -> Option<&Clip> {
        self.clips[state.index()].as_ref()
    }

    pub fn has_clip(&self, state: SpiritState) -> bool {
        self.clips[state.index()].is_some()
    }

    pub fn missing_states(&self) -> Vec<SpiritState> {
        SpiritState::ALL
            .into_iter()
            .filter(|s| !self.has_clip(*s))
            .collect()
    }

    pub fn frame_size_vec2(&self) -> Vec2 {
        self.frame_size.as_vec2()
    }

    #[cfg(test)]
    pub(crate) fn remove_clip(&mut self, state: SpiritState) {
        self.clips[state.index()] = None;
    }
}

/// Which character this session is playing.
#[derive(Resource, Debug, Clone)]
pub struct ActiveCharacter {
    pub id: String,
    pub name: String,
}

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationCatalog>()
            .add_systems(PreStartup, setup_catalog);
    }
}

/// Load the manifest, drop invalid characters, and build the catalog for
/// one randomly chosen survivor. With no usable character there is nothing
/// to show, so the app exits with an error.
fn setup_catalog(
    mut commands: Commands,
    mut catalog: ResMut<AnimationCatalog>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut rng: ResMut<SpiritRng>,
    asset_server: Res<AssetServer>,
    mut exit: MessageWriter<AppExit>,
) {
    let manifest = match CharacterManifest::load(MANIFEST_PATH) {
        Ok(m) => m,
        Err(e) => {
            error!("{}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let mut usable = Vec::new();
    for character in &manifest.characters {
        let errors = validate_character(character);
        if errors.is_empty() {
            usable.push(character);
        } else {
            for error in &errors {
                warn!("character '{}': {}", character.id, error);
            }
            warn!("skipping character '{}'", character.id);
        }
    }

    let Some(&character) = usable.get(rng.0.random_range(0..usable.len().max(1))) else {
        error!("no usable characters in manifest");
        exit.write(AppExit::error());
        return;
    };

    catalog.frame_size = UVec2::new(manifest.frame_width, manifest.frame_height);
    for state in SpiritState::ALL {
        // Validation guarantees every state has an entry here.
        let Some(def) = character.clips.get(state.name()) else {
            continue;
        };
        let layout = layouts.add(TextureAtlasLayout::from_grid(
            catalog.frame_size,
            def.frames,
            1,
            None,
            None,
        ));
        catalog.insert(
            state,
            Clip {
                image: asset_server.load(&def.path),
                layout,
                frames: def.frames,
            },
        );
    }

    info!(
        "playing as '{}' ({} of {} characters usable)",
        character.name,
        usable.len(),
        manifest.characters.len()
    );
    commands.insert_resource(ActiveCharacter {
        id: character.id.clone(),
        name: character.name.clone(),
    });
}

#[cfg(test)]
pub(crate) fn full_test_catalog() -> AnimationCatalog {
    let mut catalog = AnimationCatalog {
        frame_size: UVec2::new(32, 32),
        ..Default::default()
    };
    for state in SpiritState::ALL {
        catalog.insert(
            state,
            Clip {
                image: Handle::default(),
                layout: Handle::default(),
                frames: 4,
            },
        );
    }
    catalog
}
