//! Character manifest loading.
//!
//! The manifest JSON lists every playable character and the sprite strip
//! behind each of its animation clips.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::behavior::SpiritState;

#[derive(Debug)]
pub enum ManifestError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NoCharacters,
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "failed to read manifest: {}", e),
            ManifestError::Parse(e) => write!(f, "failed to parse manifest: {}", e),
            ManifestError::NoCharacters => write!(f, "manifest lists no characters"),
        }
    }
}

impl std::error::Error for ManifestError {}

/// One animation clip: a horizontal strip of equally sized frames.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipDef {
    /// Path to the strip image, relative to assets/.
    pub path: String,
    pub frames: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    /// Clips keyed by state name ("idle", "walk", ...).
    pub clips: HashMap<String, ClipDef>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterManifest {
    pub version: u32,
    /// Frame size shared by every clip, in pixels.
    pub frame_width: u32,
    pub frame_height: u32,
    pub characters: Vec<CharacterDef>,
}

impl CharacterManifest {
    pub fn load(path: &str) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(Path::new(path)).map_err(ManifestError::Io)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ManifestError> {
        let manifest: CharacterManifest =
            serde_json::from_str(contents).map_err(ManifestError::Parse)?;
        if manifest.characters.is_empty() {
            return Err(ManifestError::NoCharacters);
        }
        Ok(manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipValidationError {
    /// No clip entry for a state the state machine can enter.
    MissingState(SpiritState),
    ZeroFrames(String),
    /// Clip key that maps to no known state.
    UnknownKey(String),
}

impl fmt::Display for ClipValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipValidationError::MissingState(state) => {
                write!(f, "missing clip for state '{}'", state.name())
            }
            ClipValidationError::ZeroFrames(key) => {
                write!(f, "clip '{}' declares zero frames", key)
            }
            ClipValidationError::UnknownKey(key) => {
                write!(f, "clip key '{}' matches no state", key)
            }
        }
    }
}

/// Check a character's clip table against the state set. A character with
/// problems is reported and skipped rather than aborting the load.
pub fn validate_character(character: &CharacterDef) -> Vec<ClipValidationError> {
    let mut errors = Vec::new();

    for state in SpiritState::ALL {
        match character.clips.get(state.name()) {
            None => errors.push(ClipValidationError::MissingState(state)),
            Some(clip) if clip.frames == 0 => {
                errors.push(ClipValidationError::ZeroFrames(state.name().to_string()));
            }
            Some(_) => {}
        }
    }

    for key in character.clips.keys() {
        if SpiritState::from_name(key).is_none() {
            errors.push(ClipValidationError::UnknownKey(key.clone()));
        }
    }

    errors
}
