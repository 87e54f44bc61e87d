//! Collaborator interfaces the behavior states talk to.
//!
//! States never reach for ECS queries or global resources. Everything they
//! can do to the outside world goes through these traits, bundled into a
//! [`Services`] value that the caller builds fresh every tick.

use bevy::prelude::*;

use crate::behaviors::StateKind;

/// Animation playback service.
pub trait Animator {
    /// Length of a clip in seconds. Unknown clips report 0.0 (and warn).
    fn clip_length(&self, clip: &str) -> f32;

    /// Fire-and-forget cross-fade into a clip.
    fn cross_fade(&mut self, clip: &str, blend: f32);
}

/// State-scoped audio service.
///
/// At most one sound is active per owner; starting a new one for the same
/// owner implicitly stops the previous one.
pub trait StateAudio {
    fn play_state_sound(&mut self, sound: &str, position: Vec3, owner: StateKind);
    fn stop_state_sound(&mut self, owner: StateKind);
    fn is_playing(&self, owner: StateKind) -> bool;
    fn play_one_shot(&mut self, sound: &str, position: Vec3);
}

/// Movement and facing of the agent's own body.
///
/// Navigation internals are out of scope; `navigate_to` only hands a point
/// to whatever steering sits behind the trait.
pub trait Locomotion {
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    fn navigate_to(&mut self, point: Vec3);
    /// True when there is no destination left to walk to.
    fn has_arrived(&self) -> bool;
    /// Halts and clears the current destination.
    fn stop(&mut self);
    fn resume(&mut self);
    fn speed(&self) -> f32;
    fn set_speed(&mut self, speed: f32);
    /// Whether steering turns the body toward its destination.
    fn set_auto_rotate(&mut self, enabled: bool);
    /// Turns part of the way toward `point` (interpolated, never a snap).
    fn face_towards(&mut self, point: Vec3, dt: f32);
    /// Enables or disables the volumes that block other agents' paths.
    fn set_path_blocking(&mut self, enabled: bool);
}

/// Read-only view of potential targets.
pub trait TargetInfo {
    fn position(&self, target: Entity) -> Option<Vec3>;
    fn health(&self, target: Entity) -> Option<f32>;
}

/// Everything a behavior state may touch during one call.
pub struct Services<'a> {
    pub animator: &'a mut dyn Animator,
    pub audio: &'a mut dyn StateAudio,
    pub locomotion: &'a mut dyn Locomotion,
    pub targets: &'a dyn TargetInfo,
}
