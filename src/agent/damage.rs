//! Damage entry point for agent brains.

use bevy::prelude::*;

use super::context::{AgentContext, HitReaction};
use crate::behaviors::StateKind;

/// One incoming hit.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub amount: f32,
    /// Direction the hit travelled in (world space)
    pub direction: Vec3,
    pub hard: bool,
}

/// What a hit did to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, nothing changed
    Ignored,
    /// Getting back up; invulnerable until standing
    Absorbed,
    Killed,
    Stunned,
    Flinched,
}

impl AgentContext {
    /// Applies a hit and asks for whatever transition it causes.
    ///
    /// Death and stun are forced requests; a light hit starts a flinch that
    /// holds `is_processing_hit` until its clip has played.
    pub fn take_damage(&mut self, hit: Hit) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::Ignored;
        }
        if self.is_resurrecting {
            trace!("Hit absorbed while resurrecting");
            return DamageOutcome::Absorbed;
        }

        let amount = hit.amount.max(0.0);
        self.last_hit_direction = hit.direction;
        self.hard_hit = hit.hard;
        self.health = (self.health - amount).max(0.0);

        if self.health <= 0.0 {
            self.is_dead = true;
            self.request_state(StateKind::Die, true);
            return DamageOutcome::Killed;
        }

        self.stun_damage += amount;
        let threshold = self.tuning.stun_threshold;
        if threshold > 0.0 && self.stun_damage >= threshold {
            self.stun_damage = 0.0;
            self.state_after_stun = if self.detected_target.is_some() {
                StateKind::Chase
            } else {
                StateKind::Search
            };
            self.request_state(StateKind::Stun, true);
            return DamageOutcome::Stunned;
        }

        self.is_processing_hit = true;
        self.hit_reaction = Some(HitReaction::Pending);
        DamageOutcome::Flinched
    }
}
