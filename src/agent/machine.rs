//! Behavior state machine with guarded transitions.

use bevy::prelude::*;

use super::context::{AgentContext, HitReaction};
use super::services::Services;
use crate::behaviors::{BehaviorSet, StateKind};

/// Requests produced while applying requests are re-evaluated at most this
/// many times per call, so two states bouncing between each other cannot
/// spin forever within one tick.
const MAX_REQUEST_ROUNDS: usize = 4;

/// Result of a `change_state` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Exit and enter ran, the requested state is current
    Applied,
    /// Stored in `queued_state_after_hit`
    QueuedAfterHit,
    /// Stored in `queued_state_after_resurrection`
    QueuedAfterResurrection,
    /// Hit reaction requested while getting back up
    Ignored,
    /// `lock_state_transition` held and the request was not forced
    Dropped,
    /// Already in the requested state
    Unchanged,
}

/// Owns an agent's behavior states and the context they share.
///
/// The initial state is entered on the first `update`, once services are
/// available.
pub struct StateMachine {
    current: StateKind,
    started: bool,
    behaviors: BehaviorSet,
    context: AgentContext,
    transitions: Vec<(StateKind, StateKind)>,
}

impl StateMachine {
    pub fn new(initial: StateKind, context: AgentContext) -> Self {
        Self {
            current: initial,
            started: false,
            behaviors: BehaviorSet::default(),
            context,
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> StateKind {
        self.current
    }

    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AgentContext {
        &mut self.context
    }

    /// Applied transitions since the last drain, as `(from, to)`.
    pub fn drain_transitions(&mut self) -> Vec<(StateKind, StateKind)> {
        std::mem::take(&mut self.transitions)
    }

    /// Enters the initial state if that has not happened yet.
    pub fn start(&mut self, svc: &mut Services) {
        if self.started {
            return;
        }
        self.started = true;
        debug!("Agent starting in {}", self.current);
        self.behaviors
            .get_mut(self.current)
            .enter(&mut self.context, svc);
    }

    /// Switches to `next` unless one of the gates defers or drops it.
    ///
    /// Gates are checked in order: a flinch in progress queues the request,
    /// a resurrection in progress queues it (or ignores a hit reaction),
    /// and a transition lock drops it. `force` bypasses the flinch gate and
    /// the lock but never the resurrection gate.
    pub fn change_state(
        &mut self,
        next: StateKind,
        force: bool,
        svc: &mut Services,
    ) -> TransitionOutcome {
        self.start(svc);
        let ctx = &mut self.context;

        if ctx.is_processing_hit && !force {
            trace!("{} queued until the hit reaction ends", next);
            ctx.queued_state_after_hit = Some(next);
            return TransitionOutcome::QueuedAfterHit;
        }

        if ctx.is_resurrecting {
            if next.is_hit_reaction() {
                trace!("{} ignored while resurrecting", next);
                return TransitionOutcome::Ignored;
            }
            trace!("{} queued until resurrection ends", next);
            ctx.queued_state_after_resurrection = Some(next);
            return TransitionOutcome::QueuedAfterResurrection;
        }

        if ctx.lock_state_transition && !force {
            trace!("{} dropped, transitions locked", next);
            return TransitionOutcome::Dropped;
        }

        if next == self.current {
            return TransitionOutcome::Unchanged;
        }

        let from = self.current;
        self.behaviors.get_mut(from).exit(ctx, svc);
        self.current = next;
        self.behaviors.get_mut(next).enter(ctx, svc);
        self.transitions.push((from, next));
        debug!("Agent state {} -> {}", from, next);
        TransitionOutcome::Applied
    }

    /// Advances timers and the current state by `dt` seconds.
    pub fn update(&mut self, dt: f32, svc: &mut Services) {
        self.start(svc);

        // Requests from the sensor and the damage path
        self.apply_requests(svc);

        self.context.animation.tick(dt);
        self.context.hurt_sound_remaining = (self.context.hurt_sound_remaining - dt).max(0.0);
        self.tick_hit_reaction(dt, svc);

        self.behaviors
            .get_mut(self.current)
            .update(&mut self.context, svc, dt);

        // Requests the state made during its own update
        self.apply_requests(svc);
    }

    fn apply_requests(&mut self, svc: &mut Services) {
        for _ in 0..MAX_REQUEST_ROUNDS {
            if self.context.requests.is_empty() {
                return;
            }
            let requests = std::mem::take(&mut self.context.requests);
            for request in requests {
                self.change_state(request.next, request.force, svc);
            }
        }
        if !self.context.requests.is_empty() {
            warn!(
                "Dropping {} chained transition requests in {}",
                self.context.requests.len(),
                self.current
            );
            self.context.requests.clear();
        }
    }

    fn tick_hit_reaction(&mut self, dt: f32, svc: &mut Services) {
        let ctx = &mut self.context;
        match ctx.hit_reaction.take() {
            None => {}
            Some(HitReaction::Pending) => {
                ctx.play(svc, &ctx.clips.hit);
                if ctx.hurt_sound_remaining <= 0.0 {
                    if let Some(sound) = &ctx.sounds.hurt {
                        let position = svc.locomotion.position();
                        svc.audio.play_one_shot(sound, position);
                    }
                    ctx.hurt_sound_remaining = ctx.hurt_sound_cooldown;
                }

                let length = svc.animator.clip_length(&ctx.clips.hit);
                let duration = if length > 0.0 {
                    length
                } else {
                    ctx.hit_reaction_fallback.max(0.0)
                };
                ctx.hit_reaction = Some(HitReaction::Playing(Timer::from_seconds(
                    duration,
                    TimerMode::Once,
                )));
            }
            Some(HitReaction::Playing(mut timer)) => {
                if !timer.tick(crate::core::step(dt)).finished() {
                    ctx.hit_reaction = Some(HitReaction::Playing(timer));
                    return;
                }
                ctx.is_processing_hit = false;
                if let Some(next) = ctx.queued_state_after_hit.take() {
                    self.change_state(next, false, svc);
                }
            }
        }
    }
}
