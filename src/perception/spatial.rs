//! Spatial queries the sensor runs against the physics world.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Nearest body found by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    /// Body center in world space
    pub position: Vec3,
    pub distance: f32,
}

/// One collider crossed by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Overlap and ray queries. Masks are raw collision group bits.
pub trait SpatialQuery {
    /// Nearest body of `mask` within `radius` of `origin`.
    fn overlap(&mut self, origin: Vec3, radius: f32, mask: u32) -> Option<Candidate>;

    /// Every collider of `mask` along the ray, nearest first.
    fn raycast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Vec<RayHit>;
}

fn filter(mask: u32, exclude: Option<Entity>) -> QueryFilter<'static> {
    let groups = CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask));
    let filter = QueryFilter::default().groups(groups);
    match exclude {
        Some(entity) => filter.exclude_collider(entity),
        None => filter,
    }
}

/// World transforms the Rapier query reads candidate positions from.
pub type TransformQuery<'w, 's> = Query<'w, 's, &'static GlobalTransform>;

/// [`SpatialQuery`] over the Rapier physics world.
pub struct RapierSpatialQuery<'a, 'w, 's> {
    pub context: &'a RapierContext,
    pub transforms: &'a TransformQuery<'w, 's>,
    /// The querying agent's own body
    pub exclude: Option<Entity>,
}

impl SpatialQuery for RapierSpatialQuery<'_, '_, '_> {
    fn overlap(&mut self, origin: Vec3, radius: f32, mask: u32) -> Option<Candidate> {
        let mut nearest: Option<Candidate> = None;

        self.context.intersections_with_shape(
            origin,
            Quat::IDENTITY,
            &Collider::ball(radius),
            filter(mask, self.exclude),
            |entity| {
                // A body without a transform is as good as gone
                if let Ok(transform) = self.transforms.get(entity) {
                    let position = transform.translation();
                    let distance = origin.distance(position);
                    if nearest.map_or(true, |best| distance < best.distance) {
                        nearest = Some(Candidate {
                            entity,
                            position,
                            distance,
                        });
                    }
                }
                true
            },
        );

        nearest
    }

    fn raycast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Vec<RayHit> {
        let mut hits = Vec::new();

        self.context.intersections_with_ray(
            origin,
            direction,
            max_distance,
            true,
            filter(mask, self.exclude),
            |entity, intersection| {
                hits.push(RayHit {
                    entity,
                    distance: intersection.time_of_impact,
                });
                true
            },
        );

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
