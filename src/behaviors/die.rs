//! Die - play the death fall, then lie down as a corpse.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, ClipNames, Services};
use crate::animation::{WaitStatus, WaitTicket};

/// Picks the death clip for the killing hit.
///
/// Hard hits knock the body over: onto its back when struck from the front
/// (`forward . hit_direction < 0`), onto its face otherwise.
pub fn death_clip(clips: &ClipNames, hard: bool, forward: Vec3, hit_direction: Vec3) -> &str {
    if !hard {
        &clips.death
    } else if forward.dot(hit_direction) < 0.0 {
        &clips.death_front
    } else {
        &clips.death_back
    }
}

#[derive(Default)]
pub struct Die {
    ticket: Option<WaitTicket>,
}

impl Behavior for Die {
    fn kind(&self) -> StateKind {
        StateKind::Die
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        ctx.is_trembling = false;
        svc.locomotion.stop();
        ctx.cancel_hit_reaction();

        ctx.is_dead = true;
        ctx.lock_state_transition = true;
        ctx.sensing = false;
        ctx.detected_target = None;

        let clip = death_clip(
            &ctx.clips,
            ctx.hard_hit,
            svc.locomotion.forward(),
            ctx.last_hit_direction,
        );
        svc.locomotion.set_path_blocking(false);
        ctx.play_state_sound(svc, ctx.sounds.death.as_ref(), StateKind::Die);
        self.ticket = Some(ctx.animation.play_and_wait(&mut *svc.animator, clip, ctx.blend));
    }

    fn update(&mut self, ctx: &mut AgentContext, _svc: &mut Services, _dt: f32) {
        let Some(ticket) = self.ticket else {
            return;
        };
        if ctx.animation.status(ticket) != WaitStatus::Pending {
            self.ticket = None;
            ctx.request_state(StateKind::Incapacitated, true);
        }
    }

    fn exit(&mut self, _ctx: &mut AgentContext, svc: &mut Services) {
        self.ticket = None;
        svc.audio.stop_state_sound(StateKind::Die);
    }
}
