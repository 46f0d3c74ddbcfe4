//! Physics components for ECS entities.

use glam::Vec2;

/// Minimum body size along either axis. Smaller sizes are clamped up.
pub const MIN_BODY_SIZE: f32 = 1.0;

/// Collision role of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable. Tested against, never initiates a sweep.
    Static,
    /// Moves and initiates sweeps; also tested against.
    Dynamic,
    /// World boundary. Behaves like `Static` for collision purposes.
    Border,
}

/// Axis-aligned rectangular body component.
///
/// The position lives in the entity's `Transform`; this component carries
/// the collision state. The size is kept at least [`MIN_BODY_SIZE`] per
/// axis, and the box-center offset (`origin`) and the most recent size
/// change (`size_delta`) are maintained alongside it, so the fields are
/// private behind [`set_size`](Body::set_size).
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    /// Units per second. Corrected in place by contact resolution.
    pub velocity: Vec2,
    size: Vec2,
    origin: Vec2,
    size_delta: Vec2,
}

impl Body {
    fn new(kind: BodyKind, size: Vec2) -> Self {
        let size = size.max(Vec2::splat(MIN_BODY_SIZE));
        Self {
            kind,
            velocity: Vec2::ZERO,
            size,
            origin: size * 0.5,
            size_delta: Vec2::ZERO,
        }
    }

    /// Create a new dynamic body with the given size.
    pub fn new_dynamic(size: Vec2) -> Self {
        Self::new(BodyKind::Dynamic, size)
    }

    /// Create a new static body with the given size.
    pub fn new_static(size: Vec2) -> Self {
        Self::new(BodyKind::Static, size)
    }

    /// Create a new border body with the given size.
    pub fn new_border(size: Vec2) -> Self {
        Self::new(BodyKind::Border, size)
    }

    /// Box extent in world units, at least [`MIN_BODY_SIZE`] per axis.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Offset from the box's top-left corner to its center.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size change recorded by the last [`set_size`](Body::set_size),
    /// cleared at the end of every fixed step. A body whose size changed
    /// is swept even when its velocity is zero.
    pub fn size_delta(&self) -> Vec2 {
        self.size_delta
    }

    /// Resize the body. Components below [`MIN_BODY_SIZE`] are clamped.
    pub fn set_size(&mut self, size: Vec2) {
        let size = size.max(Vec2::splat(MIN_BODY_SIZE));
        self.size_delta = size - self.size;
        self.size = size;
        self.origin = size * 0.5;
    }

    /// Reset the recorded size change. Called at the end of each fixed
    /// step.
    pub fn clear_size_delta(&mut self) {
        self.size_delta = Vec2::ZERO;
    }
}
