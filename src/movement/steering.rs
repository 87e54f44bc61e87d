//! Steering systems.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Movement, PathBlocker};
use crate::core::{horizontal_distance, AiConfig};

/// Turns `transform` about Y toward `point` by interpolation factor `t`.
///
/// A `t` of 1.0 or more snaps; points directly above or below are ignored.
pub fn face_towards(transform: &mut Transform, point: Vec3, t: f32) {
    let position = transform.translation;
    if horizontal_distance(position, point) <= f32::EPSILON {
        return;
    }
    let level_target = Vec3::new(point.x, position.y, point.z);
    let goal = transform.looking_at(level_target, Vec3::Y).rotation;
    transform.rotation = transform.rotation.slerp(goal, t.clamp(0.0, 1.0));
}

/// Walks every agent with a destination in a straight line toward it.
pub fn steer_agents(
    time: Res<Time>,
    config: Res<AiConfig>,
    mut query: Query<(&mut Transform, &mut Movement)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut movement) in query.iter_mut() {
        if movement.halted {
            continue;
        }
        let Some(destination) = movement.destination else {
            continue;
        };

        let position = transform.translation;
        let distance = horizontal_distance(position, destination);
        if distance <= config.arrival_tolerance {
            movement.destination = None;
            continue;
        }

        let direction =
            Vec3::new(destination.x - position.x, 0.0, destination.z - position.z) / distance;
        let step = (movement.speed * dt).min(distance);
        transform.translation += direction * step;

        if movement.auto_rotate {
            face_towards(&mut transform, destination, config.turn_speed * dt);
        }
    }
}

/// Switches path-blocking colliders on and off to match their agent.
pub fn sync_path_blockers(
    mut commands: Commands,
    agents: Query<(&Movement, &Children), Changed<Movement>>,
    blockers: Query<Has<ColliderDisabled>, With<PathBlocker>>,
) {
    for (movement, children) in agents.iter() {
        for &child in children.iter() {
            let Ok(disabled) = blockers.get(child) else {
                continue;
            };
            if movement.path_blocking && disabled {
                commands.entity(child).remove::<ColliderDisabled>();
            } else if !movement.path_blocking && !disabled {
                commands.entity(child).insert(ColliderDisabled);
            }
        }
    }
}
