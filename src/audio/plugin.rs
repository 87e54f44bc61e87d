//! Audio plugin - turns recorded sound commands into kira playback.

use bevy::prelude::*;
use bevy_kira_audio::{
    Audio, AudioControl, AudioInstance, AudioSource as KiraSource, AudioTween, PlaybackState,
};
use std::collections::HashMap;

use super::components::{SoundCommand, StateSounds};
use crate::agent::{load_agent_profiles, AgentRegistry};
use crate::core::AiSet;

/// Sound handles keyed by the asset path used as sound id in profiles.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    pub sounds: HashMap<String, Handle<KiraSource>>,
}

impl SoundLibrary {
    pub fn get(&self, id: &str) -> Option<Handle<KiraSource>> {
        self.sounds.get(id).cloned()
    }
}

/// Audio plugin - needs `bevy_kira_audio::AudioPlugin` for actual sound.
pub struct AgentAudioPlugin;

impl Plugin for AgentAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundLibrary>()
            .add_systems(Startup, preload_sounds.after(load_agent_profiles))
            .add_systems(Update, play_state_sounds.in_set(AiSet::Present));
    }
}

/// Loads every sound referenced by a loaded agent profile.
pub fn preload_sounds(
    asset_server: Res<AssetServer>,
    registry: Res<AgentRegistry>,
    mut library: ResMut<SoundLibrary>,
) {
    for profile in registry.profiles.values() {
        for id in profile.sounds.all() {
            if !library.sounds.contains_key(id) {
                library.sounds.insert(id.clone(), asset_server.load(id.as_str()));
            }
        }
    }
    info!("Preloaded {} agent sounds", library.sounds.len());
}

/// Plays, stops and expires every agent's state-scoped sounds.
///
/// Without a kira backend the commands are discarded and owners stay marked
/// as playing until their state stops them.
pub fn play_state_sounds(
    audio: Option<Res<Audio>>,
    instances: Option<ResMut<Assets<AudioInstance>>>,
    library: Res<SoundLibrary>,
    mut query: Query<&mut StateSounds>,
) {
    let (Some(audio), Some(mut instances)) = (audio, instances) else {
        for mut sounds in query.iter_mut() {
            sounds.take_commands();
        }
        return;
    };

    for mut sounds in query.iter_mut() {
        for command in sounds.take_commands() {
            match command {
                SoundCommand::Play { sound, owner } => {
                    let Some(source) = library.get(&sound) else {
                        warn!("Unknown sound '{}' for the {} state", sound, owner);
                        continue;
                    };
                    let handle = audio.play(source).handle();
                    sounds.attach(owner, handle);
                }
                SoundCommand::Stop(handle) => {
                    if let Some(instance) = instances.get_mut(&handle) {
                        instance.stop(AudioTween::default());
                    }
                }
                SoundCommand::OneShot { sound } => match library.get(&sound) {
                    Some(source) => {
                        audio.play(source);
                    }
                    None => warn!("Unknown sound '{}'", sound),
                },
            }
        }

        sounds.retain_playing(|handle| !matches!(audio.state(handle), PlaybackState::Stopped));
    }
}
