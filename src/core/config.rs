//! Global AI configuration loaded from an external RON file.
//!
//! Allows tweaking shared AI timings without recompilation. Per-agent
//! numbers live in the agent profiles instead.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::agent::DataLoadError;

/// Default location of the AI config file.
pub const AI_CONFIG_PATH: &str = "assets/data/ai/ai_config.ron";

/// AI configuration loaded from assets/data/ai/ai_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Cross-fade time used when a clip is played without an explicit blend
    pub default_blend: f32,
    /// How quickly agents turn toward a facing target (higher = snappier)
    pub turn_speed: f32,
    /// Distance at which a navigation destination counts as reached
    pub arrival_tolerance: f32,
    /// Flinch duration used when an agent has no hit clip
    pub hit_reaction_fallback: f32,
    /// Minimum time between two hurt sounds from the same agent
    pub hurt_sound_cooldown: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_blend: 0.2,
            turn_speed: 8.0,
            arrival_tolerance: 0.4,
            hit_reaction_fallback: 0.4,
            hurt_sound_cooldown: 0.5,
        }
    }
}

impl AiConfig {
    /// Load AI config from the default RON file, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(AI_CONFIG_PATH)
    }

    /// Load AI config from a specific path, falling back to defaults.
    pub fn load_from(path: &str) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                return Self::default();
            }
        };
        match Self::from_ron(&contents, path) {
            Ok(config) => {
                info!("Loaded AI config from {}", path);
                config
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Parse and validate a config from RON text.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let config: AiConfig = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate().map_err(|reason| DataLoadError::InvalidConfig {
            path: path.to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// Rejects timings that would stall agents or break their timers.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.turn_speed.is_finite() && self.turn_speed > 0.0) {
            return Err("turn_speed must be positive".to_string());
        }

        let non_negative = [
            ("default_blend", self.default_blend),
            ("arrival_tolerance", self.arrival_tolerance),
            ("hit_reaction_fallback", self.hit_reaction_fallback),
            ("hurt_sound_cooldown", self.hurt_sound_cooldown),
        ];
        match non_negative
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
        {
            Some((field, _)) => Err(format!("{} must be a non-negative number", field)),
            None => Ok(()),
        }
    }
}
