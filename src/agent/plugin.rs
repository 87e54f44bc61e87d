//! Agent plugin - profiles and the brain tick.

use bevy::prelude::*;

use super::data::{load_agent_profiles, AgentRegistry};
use super::systems::{sync_agent_health, think};
use crate::core::AiSet;

/// Agent plugin - loads profiles at startup and runs every brain per frame.
pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AgentRegistry>()
            .add_systems(Startup, load_agent_profiles)
            .add_systems(
                Update,
                (think, sync_agent_health).chain().in_set(AiSet::Think),
            );
    }
}
