//! Stalker AI - perception and behavior for melee agents in Bevy.
//!
//! Agents wander around a home point, spot targets through a periodic
//! line-of-sight sensor, chase and attack them, get stunned, die, and may
//! get back up. Every agent runs a small state machine whose states talk to
//! the world only through injected collaborator traits, so the whole brain
//! can be driven from plain unit tests.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Simulation state, global events, config, system ordering
//! - **Agent**: Profiles, the brain (context + state machine), spawning
//! - **Behaviors**: Wander, Chase, Search, Attack, Hiss, Stun, Die, Incapacitated
//! - **Perception**: Vision sensor over Rapier spatial queries
//! - **Movement**: Straight-line steering stand-in for navigation
//! - **Combat**: Health, damage routing, agent strikes
//! - **Animation**: The animation-lock contract and clip playback
//! - **Audio**: State-scoped sounds through kira

pub mod agent;
pub mod animation;
pub mod audio;
pub mod behaviors;
pub mod combat;
pub mod core;
pub mod movement;
pub mod perception;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;

/// Everything that runs without assets, audio or a window.
///
/// Headless hosts and tests add this one; it still needs a `Time` source
/// and `StatesPlugin` (both in `MinimalPlugins` + `StatesPlugin`).
pub struct StalkerAiCorePlugin;

impl Plugin for StalkerAiCorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Brains and profiles
            .add_plugins(agent::AgentPlugin)

            // Sensing, steering and damage
            .add_plugins(perception::PerceptionPlugin)
            .add_plugins(movement::MovementPlugin)
            .add_plugins(combat::CombatPlugin);
    }
}

/// Full plugin: the core plus animation playback and audio.
pub struct StalkerAiPlugin;

impl Plugin for StalkerAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(StalkerAiCorePlugin)
            .add_plugins(animation::AgentAnimationPlugin)
            .add_plugins(audio::AgentAudioPlugin);
    }
}
