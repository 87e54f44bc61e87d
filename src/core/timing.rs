//! Tick helpers shared by every time-driven behavior.

use std::time::Duration;

/// Converts a frame delta in seconds into a `Duration` for ticking timers.
///
/// Negative and non-finite deltas tick by zero instead of panicking.
pub fn step(dt: f32) -> Duration {
    if dt.is_finite() && dt > 0.0 {
        Duration::from_secs_f32(dt)
    } else {
        Duration::ZERO
    }
}

/// Distance between two points ignoring height.
pub fn horizontal_distance(a: bevy::math::Vec3, b: bevy::math::Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn test_step_rejects_bad_deltas() {
        assert_eq!(step(-1.0), Duration::ZERO);
        assert_eq!(step(f32::NAN), Duration::ZERO);
        assert_eq!(step(f32::INFINITY), Duration::ZERO);
        assert!(step(0.1) > Duration::ZERO);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 50.0, 4.0);
        assert_eq!(horizontal_distance(a, b), 5.0);
    }
}
