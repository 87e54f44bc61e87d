//! Movement module - straight-line steering behind the `Locomotion` trait.
//!
//! Real navigation is somebody else's job. This is the smallest thing that
//! walks an agent to a point so the behaviors can be watched in the sandbox.

mod components;
mod plugin;
mod steering;

pub use components::*;
pub use plugin::MovementPlugin;
pub use steering::{face_towards, steer_agents, sync_path_blockers};
