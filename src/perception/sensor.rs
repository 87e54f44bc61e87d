//! Vision sensor - periodic line-of-sight scan with edge-triggered results.
//!
//! The sensor does not scan every frame. Each agent scans on a fixed
//! interval, and the first scan after enabling is pushed back by a random
//! fraction of an interval so that agents spawned together do not all
//! query the physics world on the same frame.
//!
//! A scan looks for the single nearest body on the target mask, then casts
//! a ray from head height toward it. The nearest obstacle that is not on
//! the ignore list and sits in front of the candidate blocks the view.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;

use super::layers::{OBSTACLE_GROUP, TARGET_GROUP};
use super::spatial::SpatialQuery;

/// Sensor tuning, part of an agent profile.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SensorConfig {
    /// Seconds between scans
    pub interval: f32,
    pub radius: f32,
    /// Scan origin offset along the agent's forward
    pub forward_offset: f32,
    /// Scan origin height above the agent's origin
    pub up_offset: f32,
    /// Aim point height above the candidate's body center
    pub target_height_offset: f32,
    pub target_mask: u32,
    pub obstacle_mask: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            interval: 0.25,
            radius: 12.0,
            forward_offset: 0.3,
            up_offset: 1.5,
            target_height_offset: 0.5,
            target_mask: TARGET_GROUP.bits(),
            obstacle_mask: OBSTACLE_GROUP.bits(),
        }
    }
}

/// Where the agent stands and looks when the scan runs.
#[derive(Debug, Clone, Copy)]
pub struct SensorPose {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Edge reported by one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Nothing was detected, now `target` is
    Acquired(Entity),
    /// Something was detected, now nothing is
    Lost,
    Unchanged,
}

/// Per-agent vision sensor.
#[derive(Component, Debug)]
pub struct VisionSensor {
    pub config: SensorConfig,
    enabled: bool,
    last_scan: Option<f32>,
    next_scan: f32,
    detected: Option<Entity>,
    last_blocker: Option<Entity>,
    ignored: HashSet<Entity>,
}

impl VisionSensor {
    /// A disabled sensor; call `enable` to start scanning.
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            enabled: false,
            last_scan: None,
            next_scan: 0.0,
            detected: None,
            last_blocker: None,
            ignored: HashSet::new(),
        }
    }

    /// Colliders that never block this sensor (the agent's own parts).
    pub fn ignore(&mut self, entity: Entity) {
        self.ignored.insert(entity);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn detected(&self) -> Option<Entity> {
        self.detected
    }

    pub fn last_blocker(&self) -> Option<Entity> {
        self.last_blocker
    }

    pub fn last_scan(&self) -> Option<f32> {
        self.last_scan
    }

    pub fn next_scan(&self) -> f32 {
        self.next_scan
    }

    /// Starts scanning, first scan at a random point within one interval.
    pub fn enable(&mut self, now: f32) {
        let offset = rand::thread_rng().gen_range(0.0..self.config.interval.max(f32::EPSILON));
        self.enable_with_offset(now, offset);
    }

    pub fn enable_with_offset(&mut self, now: f32, offset: f32) {
        self.enabled = true;
        self.next_scan = now + offset.max(0.0);
    }

    /// Stops scanning and forgets the current target without reporting it.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.detected = None;
        self.last_blocker = None;
    }

    /// Runs a scan if one is due at `now`.
    pub fn tick(
        &mut self,
        now: f32,
        pose: SensorPose,
        spatial: &mut dyn SpatialQuery,
    ) -> ScanOutcome {
        if !self.enabled || now < self.next_scan {
            return ScanOutcome::Unchanged;
        }
        self.last_scan = Some(now);
        self.next_scan = now + self.config.interval;
        self.scan(pose, spatial)
    }

    /// Scan origin for `pose`: ahead of and above the body.
    pub fn origin(&self, pose: SensorPose) -> Vec3 {
        pose.position
            + pose.forward.normalize_or_zero() * self.config.forward_offset
            + Vec3::Y * self.config.up_offset
    }

    /// Scans immediately and updates the detected target.
    ///
    /// Switching from one visible target to another is not an edge; the
    /// reference is updated silently.
    pub fn scan(&mut self, pose: SensorPose, spatial: &mut dyn SpatialQuery) -> ScanOutcome {
        let visible = self.find_visible(pose, spatial);

        match (self.detected, visible) {
            (None, Some(target)) => {
                self.detected = Some(target);
                ScanOutcome::Acquired(target)
            }
            (Some(_), None) => {
                self.detected = None;
                ScanOutcome::Lost
            }
            (Some(_), Some(target)) => {
                self.detected = Some(target);
                ScanOutcome::Unchanged
            }
            (None, None) => ScanOutcome::Unchanged,
        }
    }

    fn find_visible(&mut self, pose: SensorPose, spatial: &mut dyn SpatialQuery) -> Option<Entity> {
        let origin = self.origin(pose);
        let candidate = spatial.overlap(origin, self.config.radius, self.config.target_mask)?;

        let aim = candidate.position + Vec3::Y * self.config.target_height_offset;
        let to_aim = aim - origin;
        let distance = to_aim.length();
        if distance <= f32::EPSILON {
            self.last_blocker = None;
            return Some(candidate.entity);
        }

        let hits = spatial.raycast(origin, to_aim / distance, distance, self.config.obstacle_mask);
        let blocker = hits.iter().find(|hit| {
            hit.distance < distance
                && hit.entity != candidate.entity
                && !self.ignored.contains(&hit.entity)
        });

        match blocker {
            Some(hit) => {
                trace!("View of {:?} blocked by {:?}", candidate.entity, hit.entity);
                self.last_blocker = Some(hit.entity);
                None
            }
            None => {
                self.last_blocker = None;
                Some(candidate.entity)
            }
        }
    }
}
