//! Agent brain systems.

use bevy::prelude::*;

use super::components::{Agent, AgentBrain};
use super::services::{Services, TargetInfo};
use crate::animation::{AnimationQueue, ClipLibrary, QueuedAnimator};
use crate::audio::StateSounds;
use crate::combat::Health;
use crate::core::{AiConfig, AttackHitEvent, StateChanged};
use crate::movement::{Movement, MovementIo};

type TargetQuery<'w, 's> =
    Query<'w, 's, (&'static GlobalTransform, Option<&'static Health>), Without<Agent>>;

/// [`TargetInfo`] over every non-agent entity.
struct TargetLookup<'a, 'w, 's> {
    query: &'a TargetQuery<'w, 's>,
}

impl TargetInfo for TargetLookup<'_, '_, '_> {
    fn position(&self, target: Entity) -> Option<Vec3> {
        self.query.get(target).ok().map(|(transform, _)| transform.translation())
    }

    fn health(&self, target: Entity) -> Option<f32> {
        self.query
            .get(target)
            .ok()
            .and_then(|(_, health)| health.map(|h| h.current))
    }
}

/// Ticks every agent's state machine with this frame's delta.
pub fn think(
    time: Res<Time>,
    config: Res<AiConfig>,
    targets: TargetQuery,
    mut agents: Query<
        (
            Entity,
            &mut AgentBrain,
            &mut Transform,
            &mut Movement,
            &ClipLibrary,
            &mut AnimationQueue,
            &mut StateSounds,
        ),
        With<Agent>,
    >,
    mut state_events: EventWriter<StateChanged>,
    mut hit_events: EventWriter<AttackHitEvent>,
) {
    let dt = time.delta_secs();
    let lookup = TargetLookup { query: &targets };

    for (agent, mut brain, mut transform, mut movement, library, mut queue, mut sounds) in
        agents.iter_mut()
    {
        // Fades nobody played last frame are stale
        queue.pending.clear();

        let mut animator = QueuedAnimator {
            library,
            queue: &mut queue,
        };
        let mut locomotion = MovementIo {
            movement: &mut movement,
            transform: &mut transform,
            turn_speed: config.turn_speed,
        };
        let mut services = Services {
            animator: &mut animator,
            audio: &mut *sounds,
            locomotion: &mut locomotion,
            targets: &lookup,
        };
        brain.machine.update(dt, &mut services);

        for (from, to) in brain.machine.drain_transitions() {
            state_events.send(StateChanged { agent, from, to });
        }

        let damage = brain.machine.context().tuning.damage;
        for target in brain.machine.context_mut().drain_strikes() {
            hit_events.send(AttackHitEvent {
                attacker: agent,
                target,
                damage,
            });
        }
    }
}

/// Mirrors each brain's health onto its `Health` component.
pub fn sync_agent_health(mut agents: Query<(&AgentBrain, &mut Health), With<Agent>>) {
    for (brain, mut health) in agents.iter_mut() {
        let current = brain.machine.context().health.max(0.0);
        if health.current != current {
            health.current = current;
        }
    }
}
