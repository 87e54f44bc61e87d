//! Agent context - the shared record the behavior states read and write.

use bevy::prelude::*;

use super::data::{AgentProfile, AgentTuning, ClipNames, SoundNames};
use super::services::Services;
use crate::animation::AnimationLock;
use crate::behaviors::StateKind;
use crate::core::AiConfig;

/// A transition asked for outside of `StateMachine::change_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub next: StateKind,
    pub force: bool,
}

/// Light-hit flinch that holds `is_processing_hit` while it plays.
#[derive(Debug)]
pub enum HitReaction {
    /// Damage landed, clip not started yet
    Pending,
    Playing(Timer),
}

/// Per-agent state shared by the sensor, the damage path and every behavior.
pub struct AgentContext {
    pub tuning: AgentTuning,
    pub clips: ClipNames,
    pub sounds: SoundNames,
    /// Default cross-fade time for every clip this agent plays
    pub blend: f32,
    pub home: Vec3,

    pub health: f32,
    /// Weak reference to what the sensor currently sees
    pub detected_target: Option<Entity>,
    pub last_known_target_position: Option<Vec3>,
    /// Attack cooldown carried between two Attack entries
    pub attack_cooldown_remaining: f32,
    pub stun_elapsed: f32,
    /// Damage accumulated toward the stun threshold
    pub stun_damage: f32,
    pub state_after_stun: StateKind,
    pub state_after_hiss: Option<StateKind>,
    pub last_hit_direction: Vec3,
    pub hard_hit: bool,
    pub is_trembling: bool,
    pub is_dead: bool,
    /// Whether the sensor should be scanning
    pub sensing: bool,

    pub is_processing_hit: bool,
    pub is_resurrecting: bool,
    pub lock_state_transition: bool,
    pub queued_state_after_hit: Option<StateKind>,
    pub queued_state_after_resurrection: Option<StateKind>,

    pub animation: AnimationLock,
    pub hit_reaction: Option<HitReaction>,
    pub(crate) hit_reaction_fallback: f32,
    pub(crate) hurt_sound_cooldown: f32,
    pub(crate) hurt_sound_remaining: f32,

    pub(crate) requests: Vec<TransitionRequest>,
    pub(crate) strikes: Vec<Entity>,
}

impl AgentContext {
    pub fn new(profile: &AgentProfile, home: Vec3, config: &AiConfig) -> Self {
        Self {
            tuning: profile.tuning.clone(),
            clips: profile.clip_names.clone(),
            sounds: profile.sounds.clone(),
            blend: config.default_blend,
            home,
            health: profile.tuning.max_health,
            detected_target: None,
            last_known_target_position: None,
            attack_cooldown_remaining: profile.tuning.attack_cooldown,
            stun_elapsed: 0.0,
            stun_damage: 0.0,
            state_after_stun: StateKind::Search,
            state_after_hiss: None,
            last_hit_direction: Vec3::ZERO,
            hard_hit: false,
            is_trembling: false,
            is_dead: false,
            sensing: true,
            is_processing_hit: false,
            is_resurrecting: false,
            lock_state_transition: false,
            queued_state_after_hit: None,
            queued_state_after_resurrection: None,
            animation: AnimationLock::default(),
            hit_reaction: None,
            hit_reaction_fallback: config.hit_reaction_fallback,
            hurt_sound_cooldown: config.hurt_sound_cooldown,
            hurt_sound_remaining: 0.0,
            requests: Vec::new(),
            strikes: Vec::new(),
        }
    }

    /// Asks for a transition, evaluated by the machine through the usual
    /// guards once the current call returns.
    pub fn request_state(&mut self, next: StateKind, force: bool) {
        self.requests.push(TransitionRequest { next, force });
    }

    pub fn pending_requests(&self) -> &[TransitionRequest] {
        &self.requests
    }

    /// Sensor edge: nothing seen -> `target` seen.
    pub fn on_target_acquired(&mut self, target: Entity, position: Option<Vec3>) {
        self.detected_target = Some(target);
        if position.is_some() {
            self.last_known_target_position = position;
        }
        self.request_state(StateKind::Chase, false);
    }

    /// Sensor edge: target seen -> nothing seen.
    pub fn on_target_lost(&mut self) {
        self.detected_target = None;
        self.request_state(StateKind::Search, false);
    }

    /// Ends a flinch early. The queued follow-up is discarded since the
    /// caller is about to pick the next state itself.
    pub fn cancel_hit_reaction(&mut self) {
        self.hit_reaction = None;
        self.is_processing_hit = false;
        self.queued_state_after_hit = None;
    }

    /// Targets struck since the last drain.
    pub fn drain_strikes(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.strikes)
    }

    /// Plays a clip unless the animation lock is held.
    pub fn play(&self, svc: &mut Services, clip: &str) -> bool {
        self.animation.play(&mut *svc.animator, clip, self.blend)
    }

    /// Starts the sound owned by `owner`, or warns when none is assigned.
    pub fn play_state_sound(&self, svc: &mut Services, sound: Option<&String>, owner: StateKind) {
        match sound {
            Some(sound) => {
                let position = svc.locomotion.position();
                svc.audio.play_state_sound(sound, position, owner);
            }
            None => warn!("No sound assigned for the {} state", owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AgentContext {
        AgentContext::new(&AgentProfile::default(), Vec3::ZERO, &AiConfig::default())
    }

    #[test]
    fn test_new_context_starts_healthy_and_sensing() {
        let ctx = context();
        assert_eq!(ctx.health, ctx.tuning.max_health);
        assert!(ctx.sensing);
        assert!(!ctx.is_processing_hit);
        assert!(ctx.detected_target.is_none());
        assert_eq!(ctx.attack_cooldown_remaining, ctx.tuning.attack_cooldown);
    }

    #[test]
    fn test_acquire_and_lose_request_chase_then_search() {
        let mut ctx = context();
        let target = Entity::from_raw(7);

        ctx.on_target_acquired(target, Some(Vec3::new(1.0, 0.0, 2.0)));
        assert_eq!(ctx.detected_target, Some(target));
        assert_eq!(ctx.last_known_target_position, Some(Vec3::new(1.0, 0.0, 2.0)));

        ctx.on_target_lost();
        assert!(ctx.detected_target.is_none());
        // Last known position survives so Search has somewhere to go
        assert!(ctx.last_known_target_position.is_some());

        let kinds: Vec<_> = ctx.pending_requests().iter().map(|r| r.next).collect();
        assert_eq!(kinds, vec![StateKind::Chase, StateKind::Search]);
    }

    #[test]
    fn test_cancel_hit_reaction_clears_gate_and_queue() {
        let mut ctx = context();
        ctx.is_processing_hit = true;
        ctx.hit_reaction = Some(HitReaction::Pending);
        ctx.queued_state_after_hit = Some(StateKind::Chase);

        ctx.cancel_hit_reaction();

        assert!(!ctx.is_processing_hit);
        assert!(ctx.hit_reaction.is_none());
        assert!(ctx.queued_state_after_hit.is_none());
    }
}
