//! Combat plugin - damage in, strikes out.

use bevy::prelude::*;

use super::systems::{resolve_agent_strikes, route_damage};
use crate::core::AiSet;

/// Combat plugin - routes damage before the brains think and turns their
/// strikes into damage once they have.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, route_damage.in_set(AiSet::Damage))
            .add_systems(Update, resolve_agent_strikes.in_set(AiSet::Act));
    }
}
