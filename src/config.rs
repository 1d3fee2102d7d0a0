// Tunable story timings, speeds and layout, read from RON.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/story.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Durations are in seconds, distances in world pixels (y grows downwards).
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub walk_speed: f32,
    pub follow_speed: f32,
    pub follow_distance: f32,
    pub actor_size: f32,
    pub reveal_interval: f32,
    pub camera_pan: f32,
    pub camera_lerp: f32,
    pub move_horizontal: f32,
    pub move_vertical: f32,
    pub banner_fade: f32,
    pub fade_out: f32,
    pub caption_hold: f32,
    pub caption_interval: f32,
    pub fade_in: f32,
    pub night_alpha: f32,
    pub signal_zone_size: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub button_width: f32,
    pub button_height: f32,
    pub button_spacing: f32,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            walk_speed: 420.0,
            follow_speed: 110.0,
            follow_distance: 30.0,
            actor_size: 32.0,
            reveal_interval: 0.03,
            camera_pan: 0.7,
            camera_lerp: 0.06,
            move_horizontal: 2.0,
            move_vertical: 1.0,
            banner_fade: 0.5,
            fade_out: 0.6,
            caption_hold: 3.5,
            caption_interval: 0.6,
            fade_in: 0.8,
            night_alpha: 0.7,
            signal_zone_size: 230.0,
            screen_width: 1200.0,
            screen_height: 720.0,
            button_width: 400.0,
            button_height: 50.0,
            button_spacing: 20.0,
        }
    }
}

impl StoryConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Falls back to the built-in values when the file is missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded story config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Using default story config ({}): {err}", path.display());
                Self::default()
            }
        }
    }
}
