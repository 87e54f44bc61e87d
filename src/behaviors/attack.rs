//! Attack - stand still, face the target and swing on a cooldown.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::core::{horizontal_distance, step};

/// An attack clip in flight.
struct Swing {
    timer: Timer,
    /// Seconds into the clip at which the strike lands
    strike_at: f32,
    struck: bool,
}

#[derive(Default)]
pub struct Attack {
    target: Option<Entity>,
    /// Seconds until the next swing
    cooldown: f32,
    attack_duration: f32,
    swing: Option<Swing>,
    /// Target defeated; hold the idle pose and never swing again
    frozen: bool,
}

impl Attack {
    fn freeze(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        debug!("Attack target defeated, freezing");
        self.frozen = true;
        self.cooldown = f32::INFINITY;
        self.swing = None;
        svc.locomotion.stop();
        ctx.animation.force_unlock();
        ctx.play(svc, &ctx.clips.idle);
        ctx.animation.force_lock();
    }

    fn start_swing(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        ctx.animation
            .play_and_wait(&mut *svc.animator, &ctx.clips.attack, ctx.blend);
        ctx.play_state_sound(svc, ctx.sounds.attack.as_ref(), StateKind::Attack);
        self.cooldown = ctx.tuning.attack_cooldown;
        self.swing = Some(Swing {
            timer: Timer::from_seconds(self.attack_duration, TimerMode::Once),
            strike_at: self.attack_duration * ctx.tuning.hit_frame.clamp(0.0, 1.0),
            struck: false,
        });
    }
}

impl Behavior for Attack {
    fn kind(&self) -> StateKind {
        StateKind::Attack
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.audio.stop_state_sound(StateKind::Attack);
        self.target = ctx.detected_target;
        self.attack_duration = svc.animator.clip_length(&ctx.clips.attack);
        svc.locomotion.stop();
        svc.locomotion.set_auto_rotate(false);
        self.cooldown = if ctx.tuning.immediate_attack {
            0.0
        } else {
            ctx.attack_cooldown_remaining
        };
        self.swing = None;
        self.frozen = false;
        ctx.play(svc, &ctx.clips.combat_idle);
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        if self.frozen {
            return;
        }

        if ctx.detected_target.is_some() {
            self.target = ctx.detected_target;
        }
        let Some(target) = self.target else {
            ctx.on_target_lost();
            return;
        };

        if svc.targets.health(target).is_some_and(|health| health <= 0.0) {
            self.freeze(ctx, svc);
            return;
        }

        let target_position = svc.targets.position(target);
        if let Some(position) = target_position {
            svc.locomotion.face_towards(position, dt);
            ctx.last_known_target_position = Some(position);
        }

        if let Some(swing) = self.swing.as_mut() {
            swing.timer.tick(step(dt));
            if !swing.struck && swing.timer.elapsed_secs() >= swing.strike_at {
                swing.struck = true;
                ctx.strikes.push(target);
            }
            if !swing.timer.finished() {
                return;
            }
            self.swing = None;
            ctx.play(svc, &ctx.clips.combat_idle);
        }

        let Some(position) = target_position.filter(|_| ctx.detected_target.is_some()) else {
            ctx.on_target_lost();
            return;
        };

        if horizontal_distance(svc.locomotion.position(), position) > ctx.tuning.attack_range {
            ctx.state_after_hiss = Some(StateKind::Chase);
            ctx.request_state(StateKind::Hiss, false);
            return;
        }

        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.start_swing(ctx, svc);
        }
    }

    fn exit(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.audio.stop_state_sound(StateKind::Attack);
        svc.locomotion.set_auto_rotate(true);
        ctx.animation.force_unlock();
        ctx.attack_cooldown_remaining = if self.cooldown.is_finite() {
            self.cooldown.max(0.0)
        } else {
            ctx.tuning.attack_cooldown
        };
        self.swing = None;
        self.frozen = false;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentProfile, StateMachine};
    use crate::core::AiConfig;
    use crate::test_support::Harness;

    const DT: f32 = 0.1;

    fn setup(immediate: bool) -> (StateMachine, Harness, Entity) {
        let mut profile = AgentProfile::default();
        profile.tuning.attack_cooldown = 1.5;
        profile.tuning.immediate_attack = immediate;
        profile.tuning.attack_range = 2.0;
        profile.tuning.hit_frame = 0.5;
        profile.sounds.attack = Some("swing".to_string());

        let target = Entity::from_raw(42);
        let mut ctx = AgentContext::new(&profile, Vec3::ZERO, &AiConfig::default());
        ctx.detected_target = Some(target);

        let mut harness = Harness::default()
            .with_clip("attack", 0.5)
            .with_clip("combat_idle", 1.0);
        harness.targets.insert(target, Vec3::new(0.0, 0.0, -1.0), 100.0);

        (StateMachine::new(StateKind::Attack, ctx), harness, target)
    }

    fn run(sm: &mut StateMachine, harness: &mut Harness, ticks: usize) {
        for _ in 0..ticks {
            sm.update(DT, &mut harness.services());
        }
    }

    #[test]
    fn test_immediate_attack_then_full_cooldown() {
        let (mut sm, mut harness, _) = setup(true);

        run(&mut sm, &mut harness, 1);
        assert_eq!(harness.animator.count("attack"), 1);
        assert!(sm.context().animation.locked());

        // 0.5s swing, then 1.5s of cooldown before the next one
        run(&mut sm, &mut harness, 18);
        assert_eq!(harness.animator.count("attack"), 1);

        run(&mut sm, &mut harness, 5);
        assert_eq!(harness.animator.count("attack"), 2);
        assert_eq!(harness.audio.starts(StateKind::Attack), 2);
    }

    #[test]
    fn test_inherited_cooldown_delays_first_swing() {
        let (mut sm, mut harness, _) = setup(false);
        sm.context_mut().attack_cooldown_remaining = 0.55;

        run(&mut sm, &mut harness, 5);
        assert_eq!(harness.animator.count("attack"), 0);

        run(&mut sm, &mut harness, 2);
        assert_eq!(harness.animator.count("attack"), 1);
    }

    #[test]
    fn test_strike_lands_once_per_swing() {
        let (mut sm, mut harness, target) = setup(true);

        run(&mut sm, &mut harness, 2);
        assert!(sm.context_mut().drain_strikes().is_empty());

        run(&mut sm, &mut harness, 3);
        assert_eq!(sm.context_mut().drain_strikes(), vec![target]);

        run(&mut sm, &mut harness, 5);
        assert!(sm.context_mut().drain_strikes().is_empty());
    }

    #[test]
    fn test_enter_stops_and_disables_auto_rotation() {
        let (mut sm, mut harness, _) = setup(true);
        run(&mut sm, &mut harness, 1);

        assert!(harness.locomotion.halted);
        assert!(!harness.locomotion.auto_rotate);
        assert!(!harness.locomotion.faced.is_empty());
    }

    #[test]
    fn test_defeated_target_freezes_for_good() {
        let (mut sm, mut harness, target) = setup(true);

        // First swing plus cooldown down to about 0.4s left
        run(&mut sm, &mut harness, 16);
        assert_eq!(harness.animator.count("attack"), 1);

        harness.targets.set_health(target, 0.0);
        run(&mut sm, &mut harness, 1);
        assert_eq!(harness.animator.last(), Some("idle"));
        assert!(sm.context().animation.locked());

        // 10 more seconds
        run(&mut sm, &mut harness, 100);
        assert_eq!(sm.current(), StateKind::Attack);
        assert_eq!(harness.animator.count("attack"), 1);
        assert!(harness.locomotion.halted);
        assert!(sm.context().animation.locked());
    }

    #[test]
    fn test_out_of_range_hisses_then_chases() {
        let (mut sm, mut harness, target) = setup(false);
        run(&mut sm, &mut harness, 1);

        harness.targets.set_position(target, Vec3::new(0.0, 0.0, -6.0));
        run(&mut sm, &mut harness, 1);

        assert_eq!(sm.current(), StateKind::Hiss);
        assert_eq!(sm.context().state_after_hiss, Some(StateKind::Chase));
        // Exit handed control back
        assert!(harness.locomotion.auto_rotate);
        assert!(harness.audio.stopped.contains(&StateKind::Attack));
    }

    #[test]
    fn test_lost_visibility_searches() {
        let (mut sm, mut harness, _) = setup(false);
        run(&mut sm, &mut harness, 1);

        sm.context_mut().detected_target = None;
        run(&mut sm, &mut harness, 1);

        assert_eq!(sm.current(), StateKind::Search);
    }

    #[test]
    fn test_exit_writes_back_remaining_cooldown() {
        let (mut sm, mut harness, _) = setup(false);
        sm.context_mut().attack_cooldown_remaining = 1.0;
        run(&mut sm, &mut harness, 3);

        sm.context_mut().request_state(StateKind::Chase, false);
        run(&mut sm, &mut harness, 1);

        let remaining = sm.context().attack_cooldown_remaining;
        assert!(remaining > 0.6 && remaining < 0.8, "remaining {}", remaining);
    }
}
