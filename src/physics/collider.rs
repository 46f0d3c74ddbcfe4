//! Axis-aligned bounding boxes for broadphase collision detection.

use glam::Vec2;

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// World-space box occupied by a body right now.
    pub fn from_body(transform: &Transform, body: &Body) -> Self {
        Self {
            min: transform.position,
            max: transform.position + body.size(),
        }
    }

    /// Region covered by a body over one tick: the union of its current
    /// box and its pilot box (the box advanced by `velocity * dt`).
    pub fn swept(transform: &Transform, body: &Body, dt: f32) -> Self {
        let current = Self::from_body(transform, body);
        let step = body.velocity * dt;
        let pilot = Self {
            min: current.min + step,
            max: current.max + step,
        };
        current.union(&pilot)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Test whether two AABBs overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
