//! Combat systems - strike resolution and damage routing.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{Dead, Health};
use crate::agent::{Agent, AgentBrain, DamageOutcome, Hit};
use crate::core::{AttackHitEvent, DamageEvent, DeathEvent};

/// Turns agent strikes into damage for their targets.
pub fn resolve_agent_strikes(
    mut attack_hit_events: EventReader<AttackHitEvent>,
    transforms: Query<&GlobalTransform>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in attack_hit_events.read() {
        let direction = match (transforms.get(event.attacker), transforms.get(event.target)) {
            (Ok(attacker), Ok(target)) => {
                (target.translation() - attacker.translation()).normalize_or_zero()
            }
            _ => Vec3::ZERO,
        };

        damage_events.send(DamageEvent {
            target: event.target,
            source: Some(event.attacker),
            amount: event.damage,
            direction,
            hard: false,
        });
    }
}

/// Applies damage: agents through their brain, everything else to `Health`.
pub fn route_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut agents: Query<&mut AgentBrain, With<Agent>>,
    mut health_query: Query<(&mut Health, Option<&Dead>), Without<Agent>>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if let Ok(mut brain) = agents.get_mut(event.target) {
            let outcome = brain.machine.context_mut().take_damage(Hit {
                amount: event.amount,
                direction: event.direction,
                hard: event.hard,
            });
            debug!("Agent {:?} took {} damage: {:?}", event.target, event.amount, outcome);

            if outcome == DamageOutcome::Killed {
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: event.source,
                });
            }
            continue;
        }

        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        // Skip if already dead (from previous frames)
        if dead.is_some() {
            continue;
        }

        health.take_damage(event.amount);
        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
            info!("{:?} died", event.target);
        }
    }
}
