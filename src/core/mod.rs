//! Core domain: tuning configuration, session RNG, and screen geometry.

mod config;
mod geometry;


pub use config::SpiritTuning;
pub use geometry::{ScreenRect, pick_rect, screen_rect_at};

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const TUNING_PATH: &str = "assets/data/spirit_tuning.ron";

/// Seeded RNG driving every behavior roll. A single stream for the whole
/// session keeps a fixed seed reproducible end to end.
#[derive(Resource, Debug)]
pub struct SpiritRng(pub ChaCha8Rng);

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let tuning = SpiritTuning::load_or_default(TUNING_PATH);

        let seed = tuning.seed.unwrap_or_else(|| rand::rng().random());
        info!("session seed: {}", seed);

        app.insert_resource(SpiritRng(ChaCha8Rng::seed_from_u64(seed)))
            .insert_resource(tuning);
    }
}
