//! Combat module - health, damage routing and agent strikes.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use systems::{resolve_agent_strikes, route_damage};
