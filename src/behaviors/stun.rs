//! Stun - knocked senseless for a fixed time, groaning on a loop.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::core::step;

#[derive(Default)]
pub struct Stun {
    countdown: Timer,
    saved_speed: f32,
}

impl Behavior for Stun {
    fn kind(&self) -> StateKind {
        StateKind::Stun
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        ctx.cancel_hit_reaction();
        ctx.is_trembling = true;
        // Sensor edges must not cut the countdown short
        ctx.lock_state_transition = true;

        self.saved_speed = svc.locomotion.speed();
        svc.locomotion.set_speed(0.0);
        svc.locomotion.stop();

        ctx.animation.force_unlock();
        ctx.play(svc, &ctx.clips.stun);

        ctx.stun_elapsed = 0.0;
        self.countdown = Timer::from_seconds(ctx.tuning.stun_duration, TimerMode::Once);
        ctx.play_state_sound(svc, ctx.sounds.stun.as_ref(), StateKind::Stun);
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        ctx.stun_elapsed += dt;

        // Re-trigger the vocalization each time the last one finished
        if let Some(sound) = &ctx.sounds.stun {
            if !svc.audio.is_playing(StateKind::Stun) {
                let position = svc.locomotion.position();
                svc.audio.play_state_sound(sound, position, StateKind::Stun);
            }
        }

        if self.countdown.tick(step(dt)).just_finished() {
            ctx.request_state(ctx.state_after_stun, true);
        }
    }

    fn exit(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.resume();
        svc.locomotion.set_speed(self.saved_speed);
        ctx.animation.force_unlock();
        svc.audio.stop_state_sound(StateKind::Stun);
        ctx.is_trembling = false;
        ctx.lock_state_transition = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentProfile, StateMachine};
    use crate::core::AiConfig;
    use crate::test_support::Harness;

    fn setup() -> (StateMachine, Harness) {
        let mut profile = AgentProfile::default();
        profile.tuning.stun_duration = 3.0;
        profile.sounds.stun = Some("groan".to_string());
        let mut ctx = AgentContext::new(&profile, Vec3::ZERO, &AiConfig::default());
        ctx.state_after_stun = StateKind::Search;

        let mut harness = Harness::default();
        harness.locomotion.speed = 2.5;
        (StateMachine::new(StateKind::Wander, ctx), harness)
    }

    #[test]
    fn test_stun_lasts_exactly_its_duration() {
        let (mut sm, mut harness) = setup();
        sm.change_state(StateKind::Stun, true, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Stun);
        assert_eq!(harness.locomotion.speed, 0.0);
        assert!(sm.context().is_trembling);

        for _ in 0..29 {
            sm.update(0.1, &mut harness.services());
        }
        assert_eq!(sm.current(), StateKind::Stun);
        assert!(harness.audio.playing.contains_key(&StateKind::Stun));

        sm.update(0.1, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Search);
        assert!(!harness.audio.playing.contains_key(&StateKind::Stun));
        assert!(harness.audio.stopped.contains(&StateKind::Stun));
        assert!(!sm.context().is_trembling);
    }

    #[test]
    fn test_sensor_edges_do_not_end_stun_early() {
        let (mut sm, mut harness) = setup();
        sm.context_mut().detected_target = Some(Entity::from_raw(3));
        sm.change_state(StateKind::Stun, true, &mut harness.services());
        assert!(sm.context().lock_state_transition);

        for _ in 0..5 {
            sm.update(0.1, &mut harness.services());
        }
        sm.context_mut().on_target_lost();
        sm.update(0.1, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Stun);

        sm.context_mut()
            .on_target_acquired(Entity::from_raw(4), Some(Vec3::X));
        for _ in 0..23 {
            sm.update(0.1, &mut harness.services());
        }
        assert_eq!(sm.current(), StateKind::Stun);

        // 3.0s in
        sm.update(0.1, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Search);
        assert!(!sm.context().lock_state_transition);
    }

    #[test]
    fn test_death_overrides_stun() {
        let (mut sm, mut harness) = setup();
        sm.change_state(StateKind::Stun, true, &mut harness.services());
        sm.update(0.1, &mut harness.services());

        sm.context_mut().request_state(StateKind::Die, true);
        sm.update(0.1, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Die);
        // Die holds its own lock after Stun released its one
        assert!(sm.context().lock_state_transition);
        assert!(!sm.context().is_trembling);
    }

    #[test]
    fn test_exit_restores_speed() {
        let mut harness = Harness::default();
        harness.locomotion.speed = 2.5;
        let mut ctx = AgentContext::new(&AgentProfile::default(), Vec3::ZERO, &AiConfig::default());
        let mut stun = Stun::default();

        stun.enter(&mut ctx, &mut harness.services());
        assert_eq!(harness.locomotion.speed, 0.0);
        assert!(harness.locomotion.halted);

        stun.exit(&mut ctx, &mut harness.services());
        assert_eq!(harness.locomotion.speed, 2.5);
        assert!(!harness.locomotion.halted);
    }

    #[test]
    fn test_vocalization_loops_until_exit() {
        let (mut sm, mut harness) = setup();
        sm.change_state(StateKind::Stun, true, &mut harness.services());
        assert_eq!(harness.audio.starts(StateKind::Stun), 1);

        sm.update(0.1, &mut harness.services());
        assert_eq!(harness.audio.starts(StateKind::Stun), 1);

        harness.audio.finish(StateKind::Stun);
        sm.update(0.1, &mut harness.services());
        assert_eq!(harness.audio.starts(StateKind::Stun), 2);

        harness.audio.finish(StateKind::Stun);
        sm.update(0.1, &mut harness.services());
        assert_eq!(harness.audio.starts(StateKind::Stun), 3);
    }

    #[test]
    fn test_stun_cancels_flinch() {
        let (mut sm, mut harness) = setup();
        sm.context_mut().is_processing_hit = true;
        sm.context_mut().queued_state_after_hit = Some(StateKind::Chase);

        sm.change_state(StateKind::Stun, true, &mut harness.services());
        assert!(!sm.context().is_processing_hit);
        assert!(sm.context().queued_state_after_hit.is_none());
    }
}
