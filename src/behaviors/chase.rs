//! Chase - run at the detected target until it is within reach.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::core::horizontal_distance;

#[derive(Default)]
pub struct Chase;

impl Behavior for Chase {
    fn kind(&self) -> StateKind {
        StateKind::Chase
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.resume();
        svc.locomotion.set_speed(ctx.tuning.chase_speed);
        svc.locomotion.set_auto_rotate(true);
        ctx.play(svc, &ctx.clips.run);
        ctx.play_state_sound(svc, ctx.sounds.chase.as_ref(), StateKind::Chase);
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, _dt: f32) {
        let Some(target) = ctx.detected_target else {
            ctx.request_state(StateKind::Search, false);
            return;
        };

        let Some(position) = svc.targets.position(target) else {
            warn!("Chase target {:?} has no transform", target);
            ctx.on_target_lost();
            return;
        };
        ctx.last_known_target_position = Some(position);

        if let Some(sound) = &ctx.sounds.chase {
            if !svc.audio.is_playing(StateKind::Chase) {
                svc.audio.play_state_sound(sound, svc.locomotion.position(), StateKind::Chase);
            }
        }

        if horizontal_distance(svc.locomotion.position(), position) <= ctx.tuning.attack_range {
            ctx.request_state(StateKind::Attack, false);
            return;
        }

        svc.locomotion.navigate_to(position);
    }

    fn exit(&mut self, _ctx: &mut AgentContext, svc: &mut Services) {
        svc.audio.stop_state_sound(StateKind::Chase);
    }
}
