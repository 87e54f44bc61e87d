//! Perception module - the vision sensor and the physics queries behind it.

mod layers;
mod plugin;
mod sensor;
mod spatial;

pub use layers::*;
pub use plugin::{scan_for_targets, PerceptionPlugin};
pub use sensor::{ScanOutcome, SensorConfig, SensorPose, VisionSensor};
pub use spatial::{Candidate, RapierSpatialQuery, RayHit, SpatialQuery, TransformQuery};
