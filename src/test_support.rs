//! Recording fakes for the collaborator traits, shared by unit tests.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::agent::{Animator, Locomotion, Services, StateAudio, TargetInfo};
use crate::behaviors::StateKind;
use crate::perception::{Candidate, RayHit, SpatialQuery};

#[derive(Default)]
pub struct FakeAnimator {
    pub lengths: HashMap<String, f32>,
    pub fades: Vec<(String, f32)>,
}

impl FakeAnimator {
    pub fn with_clip(mut self, name: &str, length: f32) -> Self {
        self.lengths.insert(name.to_string(), length);
        self
    }

    pub fn count(&self, clip: &str) -> usize {
        self.fades.iter().filter(|(name, _)| name == clip).count()
    }

    pub fn last(&self) -> Option<&str> {
        self.fades.last().map(|(name, _)| name.as_str())
    }
}

impl Animator for FakeAnimator {
    fn clip_length(&self, clip: &str) -> f32 {
        self.lengths.get(clip).copied().unwrap_or(0.0)
    }

    fn cross_fade(&mut self, clip: &str, blend: f32) {
        self.fades.push((clip.to_string(), blend));
    }
}

#[derive(Default)]
pub struct FakeAudio {
    pub playing: HashMap<StateKind, String>,
    pub started: Vec<(StateKind, String)>,
    pub stopped: Vec<StateKind>,
    pub one_shots: Vec<String>,
}

impl FakeAudio {
    /// Simulates the sound owned by `owner` reaching its end.
    pub fn finish(&mut self, owner: StateKind) {
        self.playing.remove(&owner);
    }

    pub fn starts(&self, owner: StateKind) -> usize {
        self.started.iter().filter(|(kind, _)| *kind == owner).count()
    }
}

impl StateAudio for FakeAudio {
    fn play_state_sound(&mut self, sound: &str, _position: Vec3, owner: StateKind) {
        self.playing.insert(owner, sound.to_string());
        self.started.push((owner, sound.to_string()));
    }

    fn stop_state_sound(&mut self, owner: StateKind) {
        self.playing.remove(&owner);
        self.stopped.push(owner);
    }

    fn is_playing(&self, owner: StateKind) -> bool {
        self.playing.contains_key(&owner)
    }

    fn play_one_shot(&mut self, sound: &str, _position: Vec3) {
        self.one_shots.push(sound.to_string());
    }
}

pub struct FakeLocomotion {
    pub position: Vec3,
    pub forward: Vec3,
    pub destination: Option<Vec3>,
    pub halted: bool,
    pub speed: f32,
    pub auto_rotate: bool,
    pub path_blocking: bool,
    pub faced: Vec<Vec3>,
}

impl Default for FakeLocomotion {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            destination: None,
            halted: false,
            speed: 0.0,
            auto_rotate: true,
            path_blocking: true,
            faced: Vec::new(),
        }
    }
}

impl Locomotion for FakeLocomotion {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn navigate_to(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn has_arrived(&self) -> bool {
        self.destination.is_none()
    }

    fn stop(&mut self) {
        self.halted = true;
        self.destination = None;
    }

    fn resume(&mut self) {
        self.halted = false;
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    fn face_towards(&mut self, point: Vec3, _dt: f32) {
        self.faced.push(point);
    }

    fn set_path_blocking(&mut self, enabled: bool) {
        self.path_blocking = enabled;
    }
}

#[derive(Default)]
pub struct FakeTargets {
    pub targets: HashMap<Entity, (Vec3, f32)>,
}

impl FakeTargets {
    pub fn insert(&mut self, target: Entity, position: Vec3, health: f32) {
        self.targets.insert(target, (position, health));
    }

    pub fn set_health(&mut self, target: Entity, health: f32) {
        if let Some(entry) = self.targets.get_mut(&target) {
            entry.1 = health;
        }
    }

    pub fn set_position(&mut self, target: Entity, position: Vec3) {
        if let Some(entry) = self.targets.get_mut(&target) {
            entry.0 = position;
        }
    }
}

impl TargetInfo for FakeTargets {
    fn position(&self, target: Entity) -> Option<Vec3> {
        self.targets.get(&target).map(|(position, _)| *position)
    }

    fn health(&self, target: Entity) -> Option<f32> {
        self.targets.get(&target).map(|(_, health)| *health)
    }
}

/// Spatial query answering from a fixed candidate and obstacle list.
#[derive(Default)]
pub struct ScriptedSpatial {
    pub candidate: Option<Candidate>,
    pub hits: Vec<RayHit>,
    pub overlaps: usize,
    pub raycasts: usize,
    pub removed: HashSet<Entity>,
}

impl ScriptedSpatial {
    pub fn with_candidate(mut self, entity: Entity, position: Vec3, distance: f32) -> Self {
        self.candidate = Some(Candidate {
            entity,
            position,
            distance,
        });
        self
    }

    pub fn with_hit(mut self, entity: Entity, distance: f32) -> Self {
        self.hits.push(RayHit { entity, distance });
        self
    }
}

impl SpatialQuery for ScriptedSpatial {
    fn overlap(&mut self, _origin: Vec3, radius: f32, _mask: u32) -> Option<Candidate> {
        self.overlaps += 1;
        self.candidate.filter(|candidate| {
            candidate.distance <= radius && !self.removed.contains(&candidate.entity)
        })
    }

    fn raycast(
        &mut self,
        _origin: Vec3,
        _direction: Vec3,
        max_distance: f32,
        _mask: u32,
    ) -> Vec<RayHit> {
        self.raycasts += 1;
        let mut hits: Vec<RayHit> = self
            .hits
            .iter()
            .copied()
            .filter(|hit| hit.distance <= max_distance && !self.removed.contains(&hit.entity))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// One of each fake, lent out as a `Services` bundle.
#[derive(Default)]
pub struct Harness {
    pub animator: FakeAnimator,
    pub audio: FakeAudio,
    pub locomotion: FakeLocomotion,
    pub targets: FakeTargets,
}

impl Harness {
    pub fn with_clip(mut self, name: &str, length: f32) -> Self {
        self.animator.lengths.insert(name.to_string(), length);
        self
    }

    pub fn services(&mut self) -> Services<'_> {
        Services {
            animator: &mut self.animator,
            audio: &mut self.audio,
            locomotion: &mut self.locomotion,
            targets: &self.targets,
        }
    }
}
