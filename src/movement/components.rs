//! Movement components and the locomotion adapter the brains use.

use bevy::prelude::*;

use super::steering::face_towards;
use crate::agent::Locomotion;

/// Steering input for one agent, written by its brain.
#[derive(Component, Debug, Clone)]
pub struct Movement {
    pub destination: Option<Vec3>,
    /// Halted agents keep their destination cleared and do not move
    pub halted: bool,
    pub speed: f32,
    /// Turn toward the destination while walking
    pub auto_rotate: bool,
    pub path_blocking: bool,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            destination: None,
            halted: false,
            speed: 0.0,
            auto_rotate: true,
            path_blocking: true,
        }
    }
}

/// Child collider that keeps other agents from walking through this one.
#[derive(Component)]
pub struct PathBlocker;

/// [`Locomotion`] over an agent's `Movement` and `Transform`.
pub struct MovementIo<'a> {
    pub movement: &'a mut Movement,
    pub transform: &'a mut Transform,
    pub turn_speed: f32,
}

impl Locomotion for MovementIo<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn forward(&self) -> Vec3 {
        self.transform.forward().as_vec3()
    }

    fn navigate_to(&mut self, point: Vec3) {
        self.movement.destination = Some(point);
    }

    fn has_arrived(&self) -> bool {
        self.movement.destination.is_none()
    }

    fn stop(&mut self) {
        self.movement.halted = true;
        self.movement.destination = None;
    }

    fn resume(&mut self) {
        self.movement.halted = false;
    }

    fn speed(&self) -> f32 {
        self.movement.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.movement.speed = speed;
    }

    fn set_auto_rotate(&mut self, enabled: bool) {
        self.movement.auto_rotate = enabled;
    }

    fn face_towards(&mut self, point: Vec3, dt: f32) {
        face_towards(self.transform, point, self.turn_speed * dt);
    }

    fn set_path_blocking(&mut self, enabled: bool) {
        self.movement.path_blocking = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_clears_destination_until_resumed() {
        let mut movement = Movement::default();
        let mut transform = Transform::default();
        let mut io = MovementIo {
            movement: &mut movement,
            transform: &mut transform,
            turn_speed: 8.0,
        };

        io.navigate_to(Vec3::new(3.0, 0.0, 0.0));
        assert!(!io.has_arrived());

        io.stop();
        assert!(io.has_arrived());
        assert!(io.movement.halted);

        io.resume();
        assert!(!io.movement.halted);
    }

    #[test]
    fn test_forward_follows_transform() {
        let mut movement = Movement::default();
        let mut transform =
            Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let io = MovementIo {
            movement: &mut movement,
            transform: &mut transform,
            turn_speed: 8.0,
        };
        assert!(io.forward().distance(Vec3::NEG_X) < 1e-5);
    }
}
