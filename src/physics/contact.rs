//! Contact records produced by collision resolution.

use glam::Vec2;

/// A single contact between a subject body and an obstacle, valid for the
/// tick it was produced in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The body that was hit.
    pub obstacle: hecs::Entity,
    /// World-space point of first touch.
    pub point: Vec2,
    /// Surface normal at the contact: one of `(±1,0)`, `(0,±1)`, or
    /// `(0,0)` for a perfectly diagonal (corner) hit.
    pub normal: Vec2,
    /// Normalized time of impact within the tick, in `[0, 1)`.
    pub time: f32,
}
