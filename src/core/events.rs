//! Global events used for cross-system communication.
//!
//! Perception, combat and the agent brains never call each other directly.
//! The sensor system announces what it sees, the combat system announces
//! hits, and the brains announce state changes and strikes.

use bevy::prelude::*;

use crate::behaviors::StateKind;

/// Sent when an entity takes damage.
///
/// Agents route this into their brain (stun threshold, hit reaction, death).
/// Any other entity with `Health` simply loses health.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (if any)
    pub source: Option<Entity>,
    /// Damage amount
    pub amount: f32,
    /// Direction the hit travelled in (world space)
    pub direction: Vec3,
    /// Heavy hits select the lie-down death clips
    pub hard: bool,
}

/// Sent when an entity dies (health reaches 0).
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when an agent's attack reaches its hit frame.
#[derive(Event, Debug, Clone)]
pub struct AttackHitEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
}

/// Sent on the none -> target edge of an agent's sensor.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetAcquired {
    pub agent: Entity,
    pub target: Entity,
}

/// Sent on the target -> none edge of an agent's sensor.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetLost {
    pub agent: Entity,
}

/// Sent whenever an agent's state machine applies a transition.
#[derive(Event, Debug, Clone, Copy)]
pub struct StateChanged {
    pub agent: Entity,
    pub from: StateKind,
    pub to: StateKind,
}
