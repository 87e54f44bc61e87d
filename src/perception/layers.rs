//! Collision groups shared by the sensor, the bodies and the sandbox scene.

use bevy_rapier3d::prelude::Group;

/// Walls, pillars and anything else that blocks line of sight.
pub const OBSTACLE_GROUP: Group = Group::GROUP_1;
/// Things agents hunt.
pub const TARGET_GROUP: Group = Group::GROUP_2;
/// Agent bodies and their path-blocking volumes.
pub const AGENT_GROUP: Group = Group::GROUP_3;
