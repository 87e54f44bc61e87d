//! Combat-related components.

use bevy::prelude::*;

/// Component for entities that can take damage.
///
/// Agents keep the authoritative value in their brain and mirror it here.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Marker component for non-agent entities that have died (prevents
/// multiple death events).
#[derive(Component)]
pub struct Dead;
