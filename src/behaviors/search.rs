//! Search - walk to where the target was last seen and look around.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::core::step;

#[derive(Default)]
pub struct Search {
    timer: Timer,
    looking_around: bool,
}

impl Behavior for Search {
    fn kind(&self) -> StateKind {
        StateKind::Search
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.resume();
        svc.locomotion.set_speed(ctx.tuning.walk_speed);
        svc.locomotion.set_auto_rotate(true);
        self.timer = Timer::from_seconds(ctx.tuning.search_duration, TimerMode::Once);

        match ctx.last_known_target_position {
            Some(position) => {
                svc.locomotion.navigate_to(position);
                self.looking_around = false;
                ctx.play(svc, &ctx.clips.walk);
            }
            None => {
                self.looking_around = true;
                ctx.play(svc, &ctx.clips.idle);
            }
        }
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        if !self.looking_around && svc.locomotion.has_arrived() {
            self.looking_around = true;
            ctx.play(svc, &ctx.clips.idle);
        }

        if self.timer.tick(step(dt)).just_finished() {
            let next = if ctx.detected_target.is_some() {
                StateKind::Chase
            } else {
                StateKind::Wander
            };
            ctx.request_state(next, false);
        }
    }

    fn exit(&mut self, _ctx: &mut AgentContext, _svc: &mut Services) {
        self.looking_around = false;
    }
}
