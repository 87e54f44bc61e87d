//! Hiss - short alert between losing reach and chasing again.

use bevy::prelude::*;

use super::{Behavior, StateKind};
use crate::agent::{AgentContext, Services};
use crate::animation::{WaitStatus, WaitTicket};

#[derive(Default)]
pub struct Hiss {
    ticket: Option<WaitTicket>,
}

impl Behavior for Hiss {
    fn kind(&self) -> StateKind {
        StateKind::Hiss
    }

    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        svc.locomotion.stop();
        ctx.lock_state_transition = true;
        ctx.play_state_sound(svc, ctx.sounds.hiss.as_ref(), StateKind::Hiss);
        self.ticket = Some(
            ctx.animation
                .play_and_wait(&mut *svc.animator, &ctx.clips.hiss, ctx.blend),
        );
    }

    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32) {
        if let Some(position) = ctx
            .detected_target
            .and_then(|target| svc.targets.position(target))
        {
            svc.locomotion.face_towards(position, dt);
        }

        let Some(ticket) = self.ticket else {
            return;
        };
        if ctx.animation.status(ticket) == WaitStatus::Pending {
            return;
        }

        self.ticket = None;
        ctx.lock_state_transition = false;
        let next = ctx.state_after_hiss.take().unwrap_or(StateKind::Chase);
        ctx.request_state(next, false);
    }

    fn exit(&mut self, ctx: &mut AgentContext, svc: &mut Services) {
        self.ticket = None;
        ctx.lock_state_transition = false;
        svc.audio.stop_state_sound(StateKind::Hiss);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentProfile, StateMachine};
    use crate::core::AiConfig;
    use crate::test_support::Harness;

    fn machine() -> StateMachine {
        let mut ctx = AgentContext::new(&AgentProfile::default(), Vec3::ZERO, &AiConfig::default());
        ctx.state_after_hiss = Some(StateKind::Chase);
        StateMachine::new(StateKind::Hiss, ctx)
    }

    #[test]
    fn test_holds_lock_until_clip_done_then_chases() {
        let mut harness = Harness::default().with_clip("hiss", 1.0);
        let mut sm = machine();

        sm.update(0.1, &mut harness.services());
        assert!(sm.context().lock_state_transition);
        assert!(harness.locomotion.halted);

        // Soft requests bounce off while hissing
        sm.context_mut().request_state(StateKind::Search, false);
        sm.update(0.1, &mut harness.services());
        assert_eq!(sm.current(), StateKind::Hiss);

        for _ in 0..9 {
            sm.update(0.1, &mut harness.services());
        }
        assert_eq!(sm.current(), StateKind::Chase);
        assert!(!sm.context().lock_state_transition);
        assert!(sm.context().state_after_hiss.is_none());
    }

    #[test]
    fn test_forced_interrupt_releases_lock() {
        let mut harness = Harness::default().with_clip("hiss", 1.0);
        let mut sm = machine();
        sm.update(0.1, &mut harness.services());

        sm.context_mut().request_state(StateKind::Search, true);
        sm.update(0.1, &mut harness.services());

        assert_eq!(sm.current(), StateKind::Search);
        assert!(!sm.context().lock_state_transition);
        assert!(harness.audio.stopped.contains(&StateKind::Hiss));
    }
}
