//! Broadphase candidate filtering using swept bounding regions.

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;

use super::collider::Aabb;

/// Swept-region broadphase filter.
///
/// For a given subject, collects every other body whose box overlaps the
/// union of the subject's current box and its box one tick ahead. Only
/// those bodies are worth a narrowphase sweep.
pub struct SweptRegionFilter;

impl Default for SweptRegionFilter {
    fn default() -> Self {
        Self
    }
}

impl SweptRegionFilter {
    pub fn new() -> Self {
        Self
    }

    /// Bodies whose box intersects the subject's swept region this tick.
    ///
    /// Entities come back in world query order; any stronger ordering is
    /// the resolver's responsibility. The subject itself is never
    /// included. A subject without the required components yields an
    /// empty set.
    pub fn candidates(
        &self,
        world: &hecs::World,
        subject: hecs::Entity,
        dt: f32,
    ) -> Vec<hecs::Entity> {
        let region = {
            let body = world.get::<&Body>(subject);
            let transform = world.get::<&Transform>(subject);
            match (body, transform) {
                (Ok(body), Ok(transform)) => Aabb::swept(&transform, &body, dt),
                _ => return Vec::new(),
            }
        };

        let mut candidates = Vec::new();
        for (entity, (transform, body)) in world.query::<(&Transform, &Body)>().iter() {
            if entity == subject {
                continue;
            }
            if Aabb::from_body(transform, body).overlaps(&region) {
                candidates.push(entity);
            }
        }
        candidates
    }
}
