//! Audio module - state-scoped agent sounds played through kira.

mod components;
mod plugin;

pub use components::{SoundCommand, StateSounds};
pub use plugin::{play_state_sounds, preload_sounds, AgentAudioPlugin, SoundLibrary};
