//! Components attached to collision entities.

pub mod physics;
pub mod transform;

pub use physics::{Body, BodyKind, MIN_BODY_SIZE};
pub use transform::Transform;
