//! Movement plugin.

use bevy::prelude::*;

use super::steering::{steer_agents, sync_path_blockers};
use crate::core::AiSet;

/// Movement plugin - applies what the brains asked for this frame.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (steer_agents, sync_path_blockers).chain().in_set(AiSet::Act),
        );
    }
}
