//! Agent module - the brain, its context and the data that configures it.

mod components;
mod context;
mod damage;
mod data;
mod error;
mod machine;
mod plugin;
mod services;
mod spawning;
mod systems;

pub use components::*;
pub use context::{AgentContext, HitReaction, TransitionRequest};
pub use damage::{DamageOutcome, Hit};
pub use data::{
    load_agent_profiles, AgentProfile, AgentRegistry, AgentTuning, ClipDef, ClipNames,
    ColliderConfig, SoundNames, AGENTS_DIR,
};
pub use error::DataLoadError;
pub use machine::{StateMachine, TransitionOutcome};
pub use plugin::AgentPlugin;
pub use services::*;
pub use spawning::spawn_agent;
pub use systems::{sync_agent_health, think};
