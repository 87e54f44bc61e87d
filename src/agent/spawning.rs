//! Agent spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Agent, AgentBrain, AgentKind};
use super::context::AgentContext;
use super::data::AgentProfile;
use super::machine::StateMachine;
use crate::animation::{AnimationQueue, ClipLibrary, NeedsAnimationSetup};
use crate::audio::StateSounds;
use crate::combat::Health;
use crate::core::AiConfig;
use crate::movement::{Movement, PathBlocker};
use crate::perception::{VisionSensor, AGENT_GROUP};

/// Spawn one agent at `position`, which also becomes its wander home.
///
/// The model scene is only attached when an asset server is available, so
/// headless hosts get the full brain without any rendering.
pub fn spawn_agent(
    commands: &mut Commands,
    profile: &AgentProfile,
    kind: &str,
    position: Vec3,
    config: &AiConfig,
    asset_server: Option<&AssetServer>,
) -> Entity {
    let collider = &profile.collider;
    let context = AgentContext::new(profile, position, config);
    let machine = StateMachine::new(profile.tuning.initial_state, context);

    let blocker = commands
        .spawn((
            PathBlocker,
            Collider::cylinder(
                collider.half_height + collider.radius,
                collider.radius * 1.5,
            ),
            CollisionGroups::new(AGENT_GROUP, AGENT_GROUP),
            Transform::default(),
        ))
        .id();

    let mut sensor = VisionSensor::new(profile.sensor.clone());
    sensor.ignore(blocker);

    let agent = commands
        .spawn((
            Agent,
            AgentKind(kind.to_string()),
            AgentBrain { machine },
            sensor,
            Movement::default(),
            ClipLibrary::from_profile(profile),
            AnimationQueue::default(),
            StateSounds::default(),
            Health::new(profile.tuning.max_health),
            Transform::from_translation(position),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(collider.half_height, collider.radius),
            CollisionGroups::new(AGENT_GROUP, Group::ALL),
        ))
        .add_child(blocker)
        .id();

    if let (Some(model_path), Some(asset_server)) = (profile.model_path.as_deref(), asset_server) {
        // Models face +Z, agents face -Z
        let model = commands
            .spawn((
                SceneRoot(asset_server.load(model_path.to_string())),
                Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::PI))
                    .with_scale(Vec3::splat(profile.scale)),
            ))
            .id();
        commands
            .entity(agent)
            .add_child(model)
            .insert(NeedsAnimationSetup);
    }

    info!("Spawned {} at {:?}", profile.name, position);
    agent
}
