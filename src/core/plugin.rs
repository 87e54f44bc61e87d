//! Core plugin that sets up the simulation state, events, and AI ordering.

use bevy::prelude::*;

use super::config::AiConfig;
use super::events::*;
use super::states::*;

/// Ordering of the per-frame AI pipeline.
///
/// Sensors report first, damage is routed next, brains think on the fresh
/// information, then movement and strikes are applied, and finally the
/// presentation layer (animation, audio) drains what the brains requested.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AiSet {
    Perception,
    Damage,
    Think,
    Act,
    Present,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The simulation state (Running / Paused)
/// - Global events (DamageEvent, TargetAcquired, StateChanged, etc.)
/// - The `AiSet` chain every other AI plugin schedules into
/// - The shared `AiConfig` resource
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize simulation state
            .init_state::<SimulationState>()

            // Shared config (file or defaults)
            .insert_resource(AiConfig::load())

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<AttackHitEvent>()
            .add_event::<TargetAcquired>()
            .add_event::<TargetLost>()
            .add_event::<StateChanged>()

            // AI pipeline ordering, frozen while paused
            .configure_sets(
                Update,
                (
                    AiSet::Perception,
                    AiSet::Damage,
                    AiSet::Think,
                    AiSet::Act,
                    AiSet::Present,
                )
                    .chain()
                    .run_if(in_state(SimulationState::Running)),
            );
    }
}
