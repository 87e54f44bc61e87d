//! Agent-related components.

use bevy::prelude::*;

use super::machine::StateMachine;

/// Marker component for all AI agents.
#[derive(Component)]
pub struct Agent;

/// Agent kind identifier (matches the profile's RON file name).
#[derive(Component, Clone, Debug)]
pub struct AgentKind(pub String);

/// The agent's state machine, which owns its context.
#[derive(Component)]
pub struct AgentBrain {
    pub machine: StateMachine,
}
