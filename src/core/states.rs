//! Simulation state that gates every AI system.
//!
//! Agents only sense, think and act while the simulation is `Running`.
//! Pausing freezes all timers, cooldowns and animation locks because the
//! systems that advance them simply stop running.

use bevy::prelude::*;

/// Top-level simulation state.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimulationState {
    /// Agents are updated every frame
    #[default]
    Running,
    /// Agents are frozen in place
    Paused,
}

impl SimulationState {
    /// The state to switch to when the pause key is pressed.
    pub fn toggled(self) -> Self {
        match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_running() {
        assert_eq!(SimulationState::default(), SimulationState::Running);
    }

    #[test]
    fn test_toggle_round_trip() {
        let state = SimulationState::Running;
        assert_eq!(state.toggled(), SimulationState::Paused);
        assert_eq!(state.toggled().toggled(), SimulationState::Running);
    }
}
