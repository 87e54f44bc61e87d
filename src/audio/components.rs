//! Per-agent sound bookkeeping.

use bevy::prelude::*;
use bevy_kira_audio::AudioInstance;
use std::collections::HashMap;

use crate::agent::StateAudio;
use crate::behaviors::StateKind;

/// One-shots waiting for playback beyond this many are dropped. Nothing
/// drains the buffer when no playback system runs.
const MAX_PENDING_ONE_SHOTS: usize = 8;

/// Work for the playback system, recorded while the brain thinks.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundCommand {
    Play { sound: String, owner: StateKind },
    Stop(Handle<AudioInstance>),
    OneShot { sound: String },
}

/// One agent's state-scoped sounds.
///
/// An owner counts as playing from the moment its sound is requested until
/// it is stopped or the playback system sees the instance end. Until the
/// playback system has started it, the owner has no instance handle yet.
#[derive(Component, Debug, Default)]
pub struct StateSounds {
    commands: Vec<SoundCommand>,
    active: HashMap<StateKind, Option<Handle<AudioInstance>>>,
}

impl StateSounds {
    pub fn take_commands(&mut self) -> Vec<SoundCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Records the instance started for `owner`'s pending sound.
    pub fn attach(&mut self, owner: StateKind, handle: Handle<AudioInstance>) {
        if let Some(slot) = self.active.get_mut(&owner) {
            *slot = Some(handle);
        }
    }

    /// Forgets owners whose instance is no longer playing.
    pub fn retain_playing(&mut self, mut playing: impl FnMut(&Handle<AudioInstance>) -> bool) {
        self.active.retain(|_, handle| handle.as_ref().map_or(true, &mut playing));
    }
}

impl StateAudio for StateSounds {
    fn play_state_sound(&mut self, sound: &str, _position: Vec3, owner: StateKind) {
        self.stop_state_sound(owner);
        self.active.insert(owner, None);
        self.commands.push(SoundCommand::Play {
            sound: sound.to_string(),
            owner,
        });
    }

    fn stop_state_sound(&mut self, owner: StateKind) {
        match self.active.remove(&owner) {
            Some(Some(handle)) => self.commands.push(SoundCommand::Stop(handle)),
            // Never started, drop the request
            Some(None) => self.commands.retain(|command| {
                !matches!(command, SoundCommand::Play { owner: pending, .. } if *pending == owner)
            }),
            None => {}
        }
    }

    fn is_playing(&self, owner: StateKind) -> bool {
        self.active.contains_key(&owner)
    }

    fn play_one_shot(&mut self, sound: &str, _position: Vec3) {
        let pending = self
            .commands
            .iter()
            .filter(|command| matches!(command, SoundCommand::OneShot { .. }))
            .count();
        if pending >= MAX_PENDING_ONE_SHOTS {
            trace!("Dropping one-shot '{}', {} already pending", sound, pending);
            return;
        }
        self.commands.push(SoundCommand::OneShot {
            sound: sound.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_before_start_cancels_request() {
        let mut sounds = StateSounds::default();
        sounds.play_state_sound("growl", Vec3::ZERO, StateKind::Chase);
        assert!(sounds.is_playing(StateKind::Chase));

        sounds.stop_state_sound(StateKind::Chase);
        assert!(!sounds.is_playing(StateKind::Chase));
        assert!(sounds.take_commands().is_empty());
    }

    #[test]
    fn test_replacing_a_started_sound_stops_the_old_instance() {
        let mut sounds = StateSounds::default();
        sounds.play_state_sound("growl", Vec3::ZERO, StateKind::Chase);
        sounds.take_commands();
        let first = Handle::<AudioInstance>::default();
        sounds.attach(StateKind::Chase, first.clone());

        sounds.play_state_sound("snarl", Vec3::ZERO, StateKind::Chase);
        assert_eq!(
            sounds.take_commands(),
            vec![
                SoundCommand::Stop(first),
                SoundCommand::Play {
                    sound: "snarl".to_string(),
                    owner: StateKind::Chase,
                },
            ]
        );
    }

    #[test]
    fn test_owners_are_independent() {
        let mut sounds = StateSounds::default();
        sounds.play_state_sound("growl", Vec3::ZERO, StateKind::Chase);
        sounds.play_state_sound("shriek", Vec3::ZERO, StateKind::Stun);
        sounds.stop_state_sound(StateKind::Chase);

        assert!(sounds.is_playing(StateKind::Stun));
        assert_eq!(sounds.take_commands().len(), 1);
    }

    #[test]
    fn test_undrained_one_shots_are_capped() {
        let mut sounds = StateSounds::default();
        sounds.play_state_sound("growl", Vec3::ZERO, StateKind::Chase);
        for _ in 0..100 {
            sounds.play_one_shot("ouch", Vec3::ZERO);
        }

        let commands = sounds.take_commands();
        assert_eq!(commands.len(), MAX_PENDING_ONE_SHOTS + 1);
        assert!(matches!(commands[0], SoundCommand::Play { .. }));

        sounds.play_one_shot("ouch", Vec3::ZERO);
        assert_eq!(sounds.take_commands().len(), 1);
    }

    #[test]
    fn test_finished_instances_are_forgotten() {
        let mut sounds = StateSounds::default();
        sounds.play_state_sound("shriek", Vec3::ZERO, StateKind::Stun);
        sounds.play_state_sound("growl", Vec3::ZERO, StateKind::Chase);
        sounds.attach(StateKind::Stun, Handle::default());

        sounds.retain_playing(|_| false);
        assert!(!sounds.is_playing(StateKind::Stun));
        // Not started yet, still pending
        assert!(sounds.is_playing(StateKind::Chase));
    }
}
