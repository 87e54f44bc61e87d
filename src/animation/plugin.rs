//! Animation plugin - presentation side of the animation contract.

use bevy::prelude::*;

use super::playback::{apply_cross_fades, setup_agent_animations, sync_clip_lengths};
use crate::core::AiSet;

/// Binds agents to their model's AnimationPlayer and plays queued fades.
pub struct AgentAnimationPlugin;

impl Plugin for AgentAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (setup_agent_animations, sync_clip_lengths, apply_cross_fades)
                .chain()
                .in_set(AiSet::Present),
        );
    }
}
