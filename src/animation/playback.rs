//! Animation playback - drives each agent's `AnimationPlayer` from its queue.

use bevy::animation::transition::AnimationTransitions;
use bevy::animation::{graph::AnimationNodeIndex, AnimationClip, AnimationPlayer, RepeatAnimation};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::clips::{AnimationQueue, ClipLibrary};
use crate::agent::{AgentKind, AgentProfile, AgentRegistry};

/// Graph and clip handles built from an agent's profile.
#[derive(Component)]
pub struct AgentAnimations {
    pub graph: Handle<AnimationGraph>,
    pub nodes: HashMap<String, AnimationNodeIndex>,
    pub clips: HashMap<String, Handle<AnimationClip>>,
    pub looping: HashSet<String>,
    /// Clips whose real length has not been read back yet
    unsynced: HashSet<String>,
}

/// Links an agent entity to its child AnimationPlayer entity.
#[derive(Component)]
pub struct AnimationLink(pub Entity);

/// Marker for agents awaiting AnimationPlayer discovery.
#[derive(Component)]
pub struct NeedsAnimationSetup;

/// Finds the AnimationPlayer in each new agent's scene and builds its graph.
pub fn setup_agent_animations(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<AgentRegistry>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    agents: Query<(Entity, &AgentKind, &Children), With<NeedsAnimationSetup>>,
    children_query: Query<&Children>,
    mut animation_player_query: Query<(Entity, &mut AnimationPlayer)>,
) {
    for (agent, kind, children) in agents.iter() {
        // The scene may not have spawned yet
        let Some(player_entity) =
            find_animation_player_entity(children, &children_query, &animation_player_query)
        else {
            continue;
        };

        let Some(profile) = registry.get(&kind.0) else {
            warn!("No profile found for agent kind: {}", kind.0);
            commands.entity(agent).remove::<NeedsAnimationSetup>();
            continue;
        };

        let Some(model_path) = profile.model_path.as_deref() else {
            commands.entity(agent).remove::<NeedsAnimationSetup>();
            continue;
        };

        let model_base = model_path.replace("#Scene0", "");
        let (graph, animations) = build_animation_graph(&asset_server, &model_base, profile);
        let graph_handle = graphs.add(graph);

        commands.entity(player_entity).insert((
            AnimationGraphHandle(graph_handle.clone()),
            AnimationTransitions::new(),
        ));

        let idle = animations.nodes.get(&profile.clip_names.idle).copied();
        commands
            .entity(agent)
            .remove::<NeedsAnimationSetup>()
            .insert((
                AnimationLink(player_entity),
                AgentAnimations {
                    graph: graph_handle,
                    ..animations
                },
            ));

        // Avoid a first frame in bind pose before the brain asks for anything
        if let (Some(idle), Ok((_, mut player))) =
            (idle, animation_player_query.get_mut(player_entity))
        {
            player.stop_all();
            player.start(idle).set_repeat(RepeatAnimation::Forever);
        }

        info!("Animation setup complete for agent: {}", profile.name);
    }
}

/// Recursively search for AnimationPlayer entity in hierarchy.
fn find_animation_player_entity(
    children: &Children,
    children_query: &Query<&Children>,
    animation_player_query: &Query<(Entity, &mut AnimationPlayer)>,
) -> Option<Entity> {
    for &child in children.iter() {
        if animation_player_query.get(child).is_ok() {
            return Some(child);
        }

        if let Ok(grandchildren) = children_query.get(child) {
            if let Some(found) =
                find_animation_player_entity(grandchildren, children_query, animation_player_query)
            {
                return Some(found);
            }
        }
    }
    None
}

/// One graph node per clip in the profile, keyed by clip name.
fn build_animation_graph(
    asset_server: &AssetServer,
    model_base: &str,
    profile: &AgentProfile,
) -> (AnimationGraph, AgentAnimations) {
    let mut graph = AnimationGraph::new();
    let mut nodes = HashMap::new();
    let mut clips = HashMap::new();
    let mut looping = HashSet::new();

    for (name, def) in &profile.clips {
        let clip: Handle<AnimationClip> =
            asset_server.load(format!("{}#Animation{}", model_base, def.index));
        nodes.insert(name.clone(), graph.add_clip(clip.clone(), 1.0, graph.root));
        clips.insert(name.clone(), clip);
        if def.looping {
            looping.insert(name.clone());
        }
    }

    let unsynced = clips.keys().cloned().collect();
    (
        graph,
        AgentAnimations {
            graph: Handle::default(),
            nodes,
            clips,
            looping,
            unsynced,
        },
    )
}

/// Replaces profile fallback lengths with the loaded clips' real lengths.
pub fn sync_clip_lengths(
    clip_assets: Res<Assets<AnimationClip>>,
    mut agents: Query<(&mut AgentAnimations, &mut ClipLibrary)>,
) {
    for (mut animations, mut library) in agents.iter_mut() {
        if animations.unsynced.is_empty() {
            continue;
        }

        let loaded: Vec<(String, f32)> = animations
            .unsynced
            .iter()
            .filter_map(|name| {
                let handle = animations.clips.get(name)?;
                let clip = clip_assets.get(handle)?;
                Some((name.clone(), clip.duration()))
            })
            .collect();

        for (name, length) in loaded {
            debug!("Clip '{}' is {:.2}s long", name, length);
            library.set_length(&name, length);
            animations.unsynced.remove(&name);
        }
    }
}

/// Plays every cross-fade the brains queued this frame.
pub fn apply_cross_fades(
    mut agents: Query<(&mut AnimationQueue, &AgentAnimations, &AnimationLink)>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    for (mut queue, animations, link) in agents.iter_mut() {
        if queue.pending.is_empty() {
            continue;
        }
        let Ok((mut player, mut transitions)) = players.get_mut(link.0) else {
            continue;
        };

        for fade in queue.pending.drain(..) {
            let Some(&node) = animations.nodes.get(&fade.clip) else {
                warn!("No animation node for clip '{}'", fade.clip);
                continue;
            };

            let repeat = if animations.looping.contains(&fade.clip) {
                RepeatAnimation::Forever
            } else {
                RepeatAnimation::Never
            };
            let blend = Duration::from_secs_f32(fade.blend.max(0.0));
            transitions
                .play(&mut player, node, blend)
                .set_repeat(repeat);
        }
    }
}
