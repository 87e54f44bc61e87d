//! Core module - simulation states, events, config, and system ordering.
//!
//! This module provides the foundation that all other AI systems build upon.

mod config;
mod events;
mod plugin;
mod states;
mod timing;

pub use config::*;
pub use events::*;
pub use plugin::{AiSet, CorePlugin};
pub use states::*;
pub use timing::*;
