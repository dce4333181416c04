//! Tuning knobs for spirit behavior, overridable from a RON file.
//!
//! Every timing, speed, probability, and threshold lives here so nothing
//! in the behavior code is a bare literal.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// All behavior tuning in one resource. Any subset of fields may be
/// overridden from `assets/data/spirit_tuning.ron`; the rest keep their
/// defaults.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpiritTuning {
    /// Fixed RNG seed; omit for a fresh seed per session.
    pub seed: Option<u64>,

    pub max_health: u32,

    // Cadence, in seconds.
    pub frame_period: f32,
    /// Death animation runs at roughly half speed.
    pub death_frame_period: f32,
    pub move_period: f32,
    pub jump_check_period: f32,
    pub climb_check_period: f32,
    pub climb_step_period: f32,
    pub fall_step_period: f32,

    // Translation per tick, in pixels.
    pub walk_step: f32,
    pub run_step: f32,
    pub climb_step: f32,
    pub fall_step: f32,

    // Probability rolls.
    pub jump_chance: f64,
    pub climb_chance: f64,
    pub fall_after_climb_chance: f64,

    // One-shot delays, in seconds.
    pub jump_revert_delay: f32,
    pub attack_revert_delay: f32,
    pub attack_cooldown: f32,
    pub hurt_revert_delay: f32,
    pub flip_pause: f32,
    pub death_reset_delay: f32,
    pub fall_death_reset_delay: f32,
    pub heal_delay: f32,
    pub recover_walk_delay: f32,
    pub retry_fallback_delay: f32,

    // Pointer interaction thresholds.
    pub click_max_duration: f32,
    pub click_max_travel: f32,
    pub drag_opacity: f32,

    // Screen placement.
    pub ground_margin: f32,
    pub midpoint_band: f32,
}

impl Default for SpiritTuning {
    fn default() -> Self {
        Self {
            seed: None,
            max_health: 5,
            frame_period: 0.15,
            death_frame_period: 0.30,
            move_period: 0.05,
            jump_check_period: 1.0,
            climb_check_period: 3.0,
            climb_step_period: 0.05,
            fall_step_period: 0.05,
            walk_step: 3.0,
            run_step: 6.0,
            climb_step: 5.0,
            fall_step: 6.0,
            jump_chance: 0.05,
            climb_chance: 1.0,
            fall_after_climb_chance: 0.5,
            jump_revert_delay: 0.7,
            attack_revert_delay: 0.7,
            attack_cooldown: 1.0,
            hurt_revert_delay: 0.7,
            flip_pause: 1.0,
            death_reset_delay: 2.0,
            fall_death_reset_delay: 1.2,
            heal_delay: 10.0,
            recover_walk_delay: 0.3,
            retry_fallback_delay: 0.25,
            click_max_duration: 0.3,
            click_max_travel: 10.0,
            drag_opacity: 0.7,
            ground_margin: 50.0,
            midpoint_band: 10.0,
        }
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl SpiritTuning {
    /// Parse a RON override file. Missing fields fall back to defaults.
    pub fn from_ron_str(contents: &str) -> Result<Self, ron::error::SpannedError> {
        ron_options().from_str(contents)
    }

    /// Load tuning from `path`, falling back to defaults when the file is
    /// absent or unparseable. A broken override never aborts startup.
    pub fn load_or_default(path: &str) -> Self {
        let tuning_path = Path::new(path);
        if !tuning_path.exists() {
            info!("no tuning file at {}, using defaults", path);
            return Self::default();
        }

        let contents = match fs::read_to_string(tuning_path) {
            Ok(c) => c,
            Err(e) => {
                error!("failed to read {}: {}, using defaults", path, e);
                return Self::default();
            }
        };

        match Self::from_ron_str(&contents) {
            Ok(tuning) => {
                info!("loaded tuning overrides from {}", path);
                tuning
            }
            Err(e) => {
                error!("failed to parse {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}
