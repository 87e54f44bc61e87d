//! Behavior states - one struct per phase of agent behavior.
//!
//! Every agent owns one pre-built instance of each state in a
//! [`BehaviorSet`]; the state machine only switches which one is current.

mod attack;
mod chase;
mod die;
mod hiss;
mod incapacitated;
mod search;
mod stun;
mod wander;

use serde::Deserialize;
use std::fmt;

use crate::agent::{AgentContext, Services};

pub use attack::Attack;
pub use chase::Chase;
pub use die::{death_clip, Die};
pub use hiss::Hiss;
pub use incapacitated::Incapacitated;
pub use search::Search;
pub use stun::Stun;
pub use wander::{wander_point, Wander};

/// Identifies a behavior state. Also used as the owner token for
/// state-scoped audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum StateKind {
    #[default]
    Wander,
    Chase,
    Search,
    Attack,
    Stun,
    Die,
    Incapacitated,
    /// Short alert played between losing attack range and chasing again
    Hiss,
}

impl StateKind {
    pub const ALL: [StateKind; 8] = [
        StateKind::Wander,
        StateKind::Chase,
        StateKind::Search,
        StateKind::Attack,
        StateKind::Stun,
        StateKind::Die,
        StateKind::Incapacitated,
        StateKind::Hiss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateKind::Wander => "Wander",
            StateKind::Chase => "Chase",
            StateKind::Search => "Search",
            StateKind::Attack => "Attack",
            StateKind::Stun => "Stun",
            StateKind::Die => "Die",
            StateKind::Incapacitated => "Incapacitated",
            StateKind::Hiss => "Hiss",
        }
    }

    /// The state a heavy hit knocks the agent into. Never honored while
    /// the agent is getting back up.
    pub fn is_hit_reaction(self) -> bool {
        self == StateKind::Stun
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One phase of agent behavior.
///
/// `exit` must release everything the state owns (timers, looping sounds,
/// animation waits) since the instance is reused on the next entry.
pub trait Behavior: Send + Sync {
    fn kind(&self) -> StateKind;
    fn enter(&mut self, ctx: &mut AgentContext, svc: &mut Services);
    fn update(&mut self, ctx: &mut AgentContext, svc: &mut Services, dt: f32);
    fn exit(&mut self, ctx: &mut AgentContext, svc: &mut Services);
}

/// All behavior states of one agent, built once at spawn.
#[derive(Default)]
pub struct BehaviorSet {
    wander: Wander,
    chase: Chase,
    search: Search,
    attack: Attack,
    stun: Stun,
    die: Die,
    incapacitated: Incapacitated,
    hiss: Hiss,
}

impl BehaviorSet {
    pub fn get_mut(&mut self, kind: StateKind) -> &mut dyn Behavior {
        match kind {
            StateKind::Wander => &mut self.wander,
            StateKind::Chase => &mut self.chase,
            StateKind::Search => &mut self.search,
            StateKind::Attack => &mut self.attack,
            StateKind::Stun => &mut self.stun,
            StateKind::Die => &mut self.die,
            StateKind::Incapacitated => &mut self.incapacitated,
            StateKind::Hiss => &mut self.hiss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_matching_state() {
        let mut set = BehaviorSet::default();
        for kind in StateKind::ALL {
            assert_eq!(set.get_mut(kind).kind(), kind);
        }
    }

    #[test]
    fn test_only_stun_is_hit_reaction() {
        let reactions: Vec<_> = StateKind::ALL
            .into_iter()
            .filter(|kind| kind.is_hit_reaction())
            .collect();
        assert_eq!(reactions, vec![StateKind::Stun]);
    }

    #[test]
    fn test_state_kind_parses_from_ron() {
        let kind: StateKind = ron::from_str("Search").unwrap();
        assert_eq!(kind, StateKind::Search);
        assert_eq!(kind.to_string(), "Search");
    }
}
