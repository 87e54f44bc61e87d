//! Animation lock - cooperative "play and wait" for committed actions.
//!
//! A behavior that commits to an action (an attack swing, a death fall, a
//! hiss) calls [`AnimationLock::play_and_wait`] and receives a
//! [`WaitTicket`]. The lock stays held for the clip's effective duration and
//! the behavior polls the ticket each tick instead of running its own timer.
//! While the lock is held, fire-and-forget [`AnimationLock::play`] calls are
//! ignored, so no state can stomp on a clip that is mid-playback.

use bevy::prelude::*;

use crate::agent::Animator;
use crate::core::step;

/// Handle returned by `play_and_wait`, used to poll for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaitTicket(u32);

/// Progress of a `play_and_wait` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// Clip still playing, lock held
    Pending,
    /// Effective duration elapsed, lock released
    Finished,
    /// Lock was force-cleared or superseded before the clip finished
    Cancelled,
}

/// Seconds a blocking clip holds the lock: the blend plus whatever of the
/// clip remains after the blend.
pub fn effective_duration(clip_length: f32, blend: f32) -> f32 {
    let blend = blend.max(0.0);
    blend + (clip_length - blend).max(0.0)
}

#[derive(Debug)]
struct ActiveWait {
    ticket: WaitTicket,
    clip: String,
    timer: Timer,
}

/// Per-agent animation lock.
#[derive(Debug, Default)]
pub struct AnimationLock {
    locked: bool,
    active: Option<ActiveWait>,
    next_ticket: u32,
    last_finished: Option<WaitTicket>,
}

impl AnimationLock {
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Non-blocking cross-fade. Returns false (and does nothing) while locked.
    pub fn play(&self, animator: &mut dyn Animator, clip: &str, blend: f32) -> bool {
        if self.locked {
            trace!("Animation '{}' ignored, lock held", clip);
            return false;
        }
        animator.cross_fade(clip, blend);
        true
    }

    /// Cross-fades into `clip` and holds the lock until it has played out.
    ///
    /// Supersedes any wait already in progress; its ticket reports `Cancelled`.
    pub fn play_and_wait(
        &mut self,
        animator: &mut dyn Animator,
        clip: &str,
        blend: f32,
    ) -> WaitTicket {
        let duration = effective_duration(animator.clip_length(clip), blend);
        animator.cross_fade(clip, blend);

        let ticket = WaitTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.locked = true;
        self.active = Some(ActiveWait {
            ticket,
            clip: clip.to_string(),
            timer: Timer::from_seconds(duration, TimerMode::Once),
        });
        ticket
    }

    /// Advances the outstanding wait, releasing the lock when it completes.
    pub fn tick(&mut self, dt: f32) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.timer.tick(step(dt)).finished() {
            trace!("Animation '{}' finished, releasing lock", active.clip);
            self.last_finished = Some(active.ticket);
            self.active = None;
            self.locked = false;
        }
    }

    pub fn status(&self, ticket: WaitTicket) -> WaitStatus {
        match &self.active {
            Some(active) if active.ticket == ticket => WaitStatus::Pending,
            _ if self.last_finished == Some(ticket) => WaitStatus::Finished,
            _ => WaitStatus::Cancelled,
        }
    }

    /// Releases the lock immediately, cancelling any outstanding wait.
    pub fn force_unlock(&mut self) {
        self.active = None;
        self.locked = false;
    }

    /// Holds the lock until `force_unlock`, cancelling any outstanding wait.
    pub fn force_lock(&mut self) {
        self.active = None;
        self.locked = true;
    }

    /// Seconds left on the outstanding wait, if any.
    pub fn remaining(&self) -> Option<f32> {
        self.active.as_ref().map(|active| active.timer.remaining_secs())
    }
}
