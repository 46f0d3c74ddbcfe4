//! Transform components for ECS entities.

use glam::Vec2;

/// 2D transform. The position is the top-left corner of the entity's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    /// Create a transform at the origin.
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec2) -> Self {
        Self { position }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
