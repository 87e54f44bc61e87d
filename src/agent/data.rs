//! Agent profiles loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::behaviors::StateKind;
use crate::perception::SensorConfig;

/// Directory scanned for `*.ron` agent profiles at startup.
pub const AGENTS_DIR: &str = "assets/data/agents";

fn default_max_health() -> f32 {
    60.0
}

fn default_damage() -> f32 {
    10.0
}

fn default_walk_speed() -> f32 {
    1.5
}

fn default_chase_speed() -> f32 {
    3.5
}

fn default_attack_range() -> f32 {
    1.8
}

fn default_attack_cooldown() -> f32 {
    1.5
}

fn default_hit_frame() -> f32 {
    0.5
}

fn default_stun_threshold() -> f32 {
    25.0
}

fn default_stun_duration() -> f32 {
    3.0
}

fn default_search_duration() -> f32 {
    6.0
}

fn default_wander_radius() -> f32 {
    6.0
}

fn default_wander_pause() -> f32 {
    2.0
}

fn default_scale() -> f32 {
    1.0
}

/// Numbers that drive the behavior states.
#[derive(Deserialize, Clone, Debug)]
pub struct AgentTuning {
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    /// Damage dealt by one attack swing
    #[serde(default = "default_damage")]
    pub damage: f32,
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    #[serde(default = "default_chase_speed")]
    pub chase_speed: f32,
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    #[serde(default = "default_attack_cooldown")]
    pub attack_cooldown: f32,
    /// Swing as soon as Attack is entered instead of waiting out the cooldown
    #[serde(default)]
    pub immediate_attack: bool,
    /// Fraction of the attack clip (0.0-1.0) at which the strike lands
    #[serde(default = "default_hit_frame")]
    pub hit_frame: f32,
    /// Accumulated damage that knocks the agent into Stun. 0 disables stuns.
    #[serde(default = "default_stun_threshold")]
    pub stun_threshold: f32,
    #[serde(default = "default_stun_duration")]
    pub stun_duration: f32,
    #[serde(default = "default_search_duration")]
    pub search_duration: f32,
    #[serde(default = "default_wander_radius")]
    pub wander_radius: f32,
    /// Idle time between two wander legs
    #[serde(default = "default_wander_pause")]
    pub wander_pause: f32,
    /// Seconds a corpse lies down before getting back up. None = stays dead.
    #[serde(default)]
    pub resurrect_after: Option<f32>,
    #[serde(default)]
    pub initial_state: StateKind,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            damage: default_damage(),
            walk_speed: default_walk_speed(),
            chase_speed: default_chase_speed(),
            attack_range: default_attack_range(),
            attack_cooldown: default_attack_cooldown(),
            immediate_attack: false,
            hit_frame: default_hit_frame(),
            stun_threshold: default_stun_threshold(),
            stun_duration: default_stun_duration(),
            search_duration: default_search_duration(),
            wander_radius: default_wander_radius(),
            wander_pause: default_wander_pause(),
            resurrect_after: None,
            initial_state: StateKind::default(),
        }
    }
}

/// Which clip each behavior plays.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClipNames {
    pub idle: String,
    pub walk: String,
    pub run: String,
    pub combat_idle: String,
    pub attack: String,
    /// Flinch played by a light hit
    pub hit: String,
    pub stun: String,
    pub hiss: String,
    pub death: String,
    /// Hard hit from the front
    pub death_front: String,
    /// Hard hit from behind or the side
    pub death_back: String,
    pub get_up: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            idle: "idle".to_string(),
            walk: "walk".to_string(),
            run: "run".to_string(),
            combat_idle: "combat_idle".to_string(),
            attack: "attack".to_string(),
            hit: "hit".to_string(),
            stun: "stun".to_string(),
            hiss: "hiss".to_string(),
            death: "death".to_string(),
            death_front: "death_front".to_string(),
            death_back: "death_back".to_string(),
            get_up: "get_up".to_string(),
        }
    }
}

/// A clip inside the agent's model file.
#[derive(Deserialize, Clone, Debug)]
pub struct ClipDef {
    /// `#Animation{index}` in the glTF
    pub index: u32,
    /// Fallback length in seconds until the asset is loaded
    pub length: f32,
    #[serde(default)]
    pub looping: bool,
}

/// Sound ids per behavior. Unassigned sounds are skipped with a warning.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct SoundNames {
    pub chase: Option<String>,
    pub attack: Option<String>,
    pub hiss: Option<String>,
    pub stun: Option<String>,
    pub death: Option<String>,
    pub hurt: Option<String>,
}

impl SoundNames {
    /// Every assigned sound id.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        [
            &self.chase,
            &self.attack,
            &self.hiss,
            &self.stun,
            &self.death,
            &self.hurt,
        ]
        .into_iter()
        .flatten()
    }
}

/// Collider configuration for an agent body.
#[derive(Deserialize, Clone, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

/// Agent definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub collider: ColliderConfig,
    #[serde(default)]
    pub tuning: AgentTuning,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub clip_names: ClipNames,
    #[serde(default)]
    pub clips: HashMap<String, ClipDef>,
    #[serde(default)]
    pub sounds: SoundNames,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: "Agent".to_string(),
            model_path: None,
            scale: default_scale(),
            collider: ColliderConfig::default(),
            tuning: AgentTuning::default(),
            sensor: SensorConfig::default(),
            clip_names: ClipNames::default(),
            clips: HashMap::new(),
            sounds: SoundNames::default(),
        }
    }
}

impl AgentProfile {
    /// Rejects values that would stall or break the brain at runtime.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| DataLoadError::InvalidProfile {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.sensor.interval <= 0.0 {
            return Err(invalid("sensor interval must be positive"));
        }
        if self.sensor.radius <= 0.0 {
            return Err(invalid("sensor radius must be positive"));
        }
        if self.tuning.max_health <= 0.0 {
            return Err(invalid("max_health must be positive"));
        }

        let tuning = &self.tuning;
        let durations = [
            ("attack_cooldown", tuning.attack_cooldown),
            ("stun_duration", tuning.stun_duration),
            ("search_duration", tuning.search_duration),
            ("wander_pause", tuning.wander_pause),
            ("resurrect_after", tuning.resurrect_after.unwrap_or(0.0)),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, value)| *value < 0.0) {
            return Err(invalid(&format!("{} must not be negative", field)));
        }

        if let Some((clip, _)) = self.clips.iter().find(|(_, def)| def.length < 0.0) {
            return Err(invalid(&format!("clip '{}' has a negative length", clip)));
        }

        Ok(())
    }

    /// Parse and validate a profile from RON text.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let profile: AgentProfile =
            ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a single profile from disk.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &display)
    }
}

/// Resource holding all loaded agent profiles, keyed by file stem.
#[derive(Resource, Default)]
pub struct AgentRegistry {
    pub profiles: HashMap<String, AgentProfile>,
}

impl AgentRegistry {
    /// Get an agent profile by kind name.
    pub fn get(&self, kind: &str) -> Option<&AgentProfile> {
        self.profiles.get(kind)
    }
}

/// Load all agent profiles from the assets/data/agents/ directory.
pub fn load_agent_profiles(mut registry: ResMut<AgentRegistry>) {
    let agents_dir = Path::new(AGENTS_DIR);

    if !agents_dir.exists() {
        warn!("Agent profile directory not found: {:?}", agents_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(agents_dir) else {
        warn!("Failed to read agent profile directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let kind = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match AgentProfile::load(&path) {
                Ok(profile) => {
                    info!("Loaded agent profile: {} ({})", profile.name, kind);
                    registry.profiles.insert(kind, profile);
                }
                Err(e) => {
                    error!("Skipping agent profile {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} agent profiles", registry.profiles.len());
}
