//! Perception plugin - runs every agent's sensor and feeds the brains.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::sensor::{ScanOutcome, SensorPose, VisionSensor};
use super::spatial::{RapierSpatialQuery, TransformQuery};
use crate::agent::AgentBrain;
use crate::core::{AiSet, TargetAcquired, TargetLost};

/// Perception plugin - scans for targets before the brains think.
pub struct PerceptionPlugin;

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, scan_for_targets.in_set(AiSet::Perception));
    }
}

/// Keeps each sensor switched on or off to match its brain, then runs any
/// scan that is due and hands the resulting edge to the brain.
pub fn scan_for_targets(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    transforms: TransformQuery,
    mut agents: Query<(Entity, &mut VisionSensor, &mut AgentBrain)>,
    mut acquired_events: EventWriter<TargetAcquired>,
    mut lost_events: EventWriter<TargetLost>,
) {
    let now = time.elapsed_secs();

    for (_, mut sensor, brain) in agents.iter_mut() {
        let sensing = brain.machine.context().sensing;
        if sensing && !sensor.is_enabled() {
            sensor.enable(now);
        } else if !sensing && sensor.is_enabled() {
            sensor.disable();
        }
    }

    // No physics world yet, nothing to look through
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (agent, mut sensor, mut brain) in agents.iter_mut() {
        if !sensor.is_enabled() {
            continue;
        }
        let Ok(transform) = transforms.get(agent) else {
            continue;
        };

        let pose = SensorPose {
            position: transform.translation(),
            forward: transform.forward().as_vec3(),
        };
        let mut spatial = RapierSpatialQuery {
            context,
            transforms: &transforms,
            exclude: Some(agent),
        };
        let outcome = sensor.tick(now, pose, &mut spatial);

        let ctx = brain.machine.context_mut();
        match outcome {
            ScanOutcome::Acquired(target) => {
                debug!("Agent {:?} spotted {:?}", agent, target);
                let position = transforms.get(target).ok().map(|t| t.translation());
                ctx.on_target_acquired(target, position);
                acquired_events.send(TargetAcquired { agent, target });
            }
            ScanOutcome::Lost => {
                debug!("Agent {:?} lost its target", agent);
                ctx.on_target_lost();
                lost_events.send(TargetLost { agent });
            }
            // Picks up silent target switches. Frames without a scan leave
            // the brain's own view alone.
            ScanOutcome::Unchanged if sensor.last_scan() == Some(now) => {
                ctx.detected_target = sensor.detected();
            }
            ScanOutcome::Unchanged => {}
        }
    }
}
