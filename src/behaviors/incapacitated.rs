//! Incapacitated - lying dead, optionally getting back up after a while.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::animation::{WaitStatus, WaitTicket};
use crate::core::step;

#[derive(Default)]
pub struct Incapacitated {
    resurrect: Option<Timer>,
    getting_up: Option<WaitTicket>,
}

impl Incapacitated {
    fn begin_resurrection(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        info!("Agent getting back up");
        ctx.is_resurrecting = true;
        ctx.is_dead = false;
        ctx.health = ctx.tuning.max_health;
        ctx.stun_damage = 0.0;
        self.getting_up = Some(
            ctx.animation
                .play_and_wait(&mut *svc.animator, &ctx.clips.get_up, ctx.blend),
        );
    }

    fn finish_resurrection(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        ctx.is_resurrecting = false;
        ctx.lock_state_transition = false;
        ctx.sensing = true;
        svc.locomotion.set_path_blocking(true);

        let next = ctx
            .queued_state_after_resurrection
            .take()
            .unwrap_or(StateKind::Search);
        ctx.request_state(next, true);
    }
}

impl Behavior for Incapacitated {
    fn kind(&self) -> StateKind {
        StateKind::Incapacitated
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.stop();
        self.getting_up = None;
        self.resurrect = ctx
            .tuning
            .resurrect_after
            .map(|seconds| Timer::from_seconds(seconds, TimerMode::Once));
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        if let Some(ticket) = self.getting_up {
            if ctx.animation.status(ticket) == WaitStatus::Pending {
                return;
            }
            self.getting_up = None;
            self.finish_resurrection(ctx, svc);
            return;
        }

        let Some(timer) = self.resurrect.as_mut() else {
            return;
        };
        if timer.tick(step(dt)).finished() {
            self.resurrect = None;
            self.begin_resurrection(ctx, svc);
        }
    }

    fn exit(&mut self, _ctx: &mut AgentContext, _svc: &mut Services) {
        self.resurrect = None;
        self.getting_up = None;
    }
}
