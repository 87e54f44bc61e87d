//! Wander - stroll between random points around home.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::core::step;

#[derive(Default)]
pub struct Wander {
    pause: Timer,
    walking: bool,
}

/// Uniform random point on the disc of `radius` around `home`.
pub fn wander_point(home: Vec3, radius: f32, rng: &mut impl Rng) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = radius.max(0.0) * rng.gen::<f32>().sqrt();
    home + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

impl Wander {
    fn rest(&mut self, ctx: &AgentContext, svc: &mut Services) {
        self.walking = false;
        self.pause = Timer::from_seconds(ctx.tuning.wander_pause, TimerMode::Once);
        ctx.play(svc, &ctx.clips.idle);
    }
}

impl Behavior for Wander {
    fn kind(&self) -> StateKind {
        StateKind::Wander
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.resume();
        svc.locomotion.set_speed(ctx.tuning.walk_speed);
        svc.locomotion.set_auto_rotate(true);
        self.rest(ctx, svc);
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        if self.walking {
            if svc.locomotion.has_arrived() {
                self.rest(ctx, svc);
            }
            return;
        }

        if self.pause.tick(step(dt)).finished() {
            let point = wander_point(ctx.home, ctx.tuning.wander_radius, &mut rand::thread_rng());
            svc.locomotion.navigate_to(point);
            self.walking = true;
            ctx.play(svc, &ctx.clips.walk);
        }
    }

    fn exit(&mut self, _ctx: &mut AgentContext, _svc: &mut Services) {
        self.walking = false;
    }
}
