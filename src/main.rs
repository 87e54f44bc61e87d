//! Stalker AI - Sandbox
//!
//! A small arena with pillars to hide behind, a target walking a loop and
//! two agents hunting it.
//!
//! Controls:
//! - Space: Light hit on every agent
//! - H: Hard hit on every agent (from the camera's side)
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use stalker_ai::agent::{load_agent_profiles, spawn_agent, Agent, AgentProfile, AgentRegistry};
use stalker_ai::combat::Health;
use stalker_ai::core::{AiConfig, DamageEvent, SimulationState, StateChanged};
use stalker_ai::perception::{OBSTACLE_GROUP, TARGET_GROUP};

/// The thing agents hunt in the sandbox.
#[derive(Component)]
struct Patrol {
    center: Vec3,
    radius: f32,
    speed: f32,
    angle: f32,
}

fn main() {
    App::new()
        // Bevy default plugins, with kira taking over audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Stalker AI Sandbox".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // AI
        .add_plugins(stalker_ai::StalkerAiPlugin)

        .add_systems(Startup, (setup_arena, spawn_agents.after(load_agent_profiles)))
        .add_systems(
            Update,
            (walk_patrol, damage_input, pause_input, log_state_changes),
        )
        .run();
}

fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 18.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(30.0, 0.2, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.25, 0.28))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(15.0, 0.1, 15.0),
        CollisionGroups::new(OBSTACLE_GROUP, Group::ALL),
    ));

    // Pillars to break line of sight
    let pillar_mesh = meshes.add(Cuboid::new(1.2, 3.0, 1.2));
    let pillar_material = materials.add(Color::srgb(0.45, 0.4, 0.35));
    for position in [
        Vec3::new(3.0, 1.5, 0.0),
        Vec3::new(-3.0, 1.5, 2.0),
        Vec3::new(0.0, 1.5, -4.0),
        Vec3::new(6.0, 1.5, 5.0),
    ] {
        commands.spawn((
            Mesh3d(pillar_mesh.clone()),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(0.6, 1.5, 0.6),
            CollisionGroups::new(OBSTACLE_GROUP, Group::ALL),
        ));
    }

    // The target
    commands.spawn((
        Name::new("Target"),
        Patrol {
            center: Vec3::new(0.0, 0.8, 0.0),
            radius: 8.0,
            speed: 0.25,
            angle: 0.0,
        },
        Health::new(100.0),
        Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.5, 0.9))),
        Transform::from_xyz(8.0, 0.8, 0.0),
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.3),
        CollisionGroups::new(TARGET_GROUP, Group::ALL),
    ));
}

fn spawn_agents(
    mut commands: Commands,
    registry: Res<AgentRegistry>,
    config: Res<AiConfig>,
    asset_server: Res<AssetServer>,
) {
    let fallback = AgentProfile::default();
    for (kind, position) in [
        ("ghoul", Vec3::new(-8.0, 0.0, -8.0)),
        ("crawler", Vec3::new(8.0, 0.0, -8.0)),
    ] {
        let profile = registry.get(kind).unwrap_or_else(|| {
            warn!("No {} profile loaded, using defaults", kind);
            &fallback
        });
        spawn_agent(&mut commands, profile, kind, position, &config, Some(&asset_server));
    }
}

/// Walks the target around its loop.
fn walk_patrol(time: Res<Time>, mut query: Query<(&mut Patrol, &mut Transform, &Health)>) {
    for (mut patrol, mut transform, health) in query.iter_mut() {
        if health.is_dead() {
            continue;
        }
        patrol.angle += patrol.speed * time.delta_secs();
        let offset = Vec3::new(patrol.angle.cos(), 0.0, patrol.angle.sin()) * patrol.radius;
        transform.translation = patrol.center + offset;
    }
}

fn damage_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    agents: Query<(Entity, &Transform), With<Agent>>,
    camera: Query<&Transform, With<Camera3d>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let hard = keyboard.just_pressed(KeyCode::KeyH);
    if !keyboard.just_pressed(KeyCode::Space) && !hard {
        return;
    }
    let origin = camera
        .get_single()
        .map(|t| t.translation)
        .unwrap_or(Vec3::ZERO);

    for (entity, transform) in agents.iter() {
        let direction = (transform.translation - origin).with_y(0.0).normalize_or_zero();
        damage_events.send(DamageEvent {
            target: entity,
            source: None,
            amount: if hard { 40.0 } else { 10.0 },
            direction,
            hard,
        });
    }
}

fn pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let next = state.get().toggled();
        info!("Simulation {:?}", next);
        next_state.set(next);
    }
}

fn log_state_changes(mut events: EventReader<StateChanged>) {
    for event in events.read() {
        info!("{:?}: {} -> {}", event.agent, event.from, event.to);
    }
}
