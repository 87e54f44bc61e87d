//! Clip lengths per agent, and the animator adapter the brains use.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::agent::{AgentProfile, Animator};

/// A cross-fade requested by a brain, applied by the playback system.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFade {
    pub clip: String,
    pub blend: f32,
}

/// Cross-fades requested this frame, drained by `apply_cross_fades`.
#[derive(Component, Debug, Default)]
pub struct AnimationQueue {
    pub pending: Vec<CrossFade>,
}

/// Known clip lengths for one agent.
///
/// Seeded from the profile and refined from the loaded animation assets.
#[derive(Component, Debug, Clone, Default)]
pub struct ClipLibrary {
    lengths: HashMap<String, f32>,
}

impl ClipLibrary {
    pub fn from_profile(profile: &AgentProfile) -> Self {
        Self {
            lengths: profile
                .clips
                .iter()
                .map(|(name, clip)| (name.clone(), clip.length))
                .collect(),
        }
    }

    pub fn with_clip(mut self, name: &str, length: f32) -> Self {
        self.set_length(name, length);
        self
    }

    pub fn set_length(&mut self, name: &str, length: f32) {
        self.lengths.insert(name.to_string(), length.max(0.0));
    }

    /// Length of a clip in seconds; unknown clips are 0.0 with a warning.
    pub fn length(&self, name: &str) -> f32 {
        match self.lengths.get(name) {
            Some(length) => *length,
            None => {
                warn!("Unknown animation clip '{}', treating length as 0", name);
                0.0
            }
        }
    }
}

/// [`Animator`] backed by an agent's clip library and animation queue.
pub struct QueuedAnimator<'a> {
    pub library: &'a ClipLibrary,
    pub queue: &'a mut AnimationQueue,
}

impl Animator for QueuedAnimator<'_> {
    fn clip_length(&self, clip: &str) -> f32 {
        self.library.length(clip)
    }

    fn cross_fade(&mut self, clip: &str, blend: f32) {
        self.queue.pending.push(CrossFade {
            clip: clip.to_string(),
            blend,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_clip_has_zero_length() {
        let library = ClipLibrary::default().with_clip("attack", 1.2);
        assert_eq!(library.length("attack"), 1.2);
        assert_eq!(library.length("missing"), 0.0);
    }

    #[test]
    fn test_negative_lengths_clamped() {
        let library = ClipLibrary::default().with_clip("broken", -3.0);
        assert_eq!(library.length("broken"), 0.0);
    }

    #[test]
    fn test_queued_animator_records_fades() {
        let library = ClipLibrary::default().with_clip("walk", 1.0);
        let mut queue = AnimationQueue::default();
        {
            let mut animator = QueuedAnimator {
                library: &library,
                queue: &mut queue,
            };
            assert_eq!(animator.clip_length("walk"), 1.0);
            animator.cross_fade("walk", 0.25);
        }
        assert_eq!(
            queue.pending,
            vec![CrossFade {
                clip: "walk".to_string(),
                blend: 0.25
            }]
        );
    }
}
