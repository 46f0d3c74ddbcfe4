//! graze: 2D swept-rectangle collision engine
//!
//! Detects and resolves collisions between moving axis-aligned rectangles,
//! one simulation tick at a time, over bodies stored in a hecs ECS world.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - hecs components (`Transform`, `Body`)
//! 2. **physics::collider** - axis-aligned bounding boxes
//! 3. **physics::narrowphase** - slab-method ray-vs-box and Minkowski sweep
//! 4. **physics::broadphase** - swept-region candidate filter
//! 5. **physics::solver** - time-ordered sequential velocity correction
//! 6. **physics** - `PhysicsWorld` front-end with fixed-timestep stepping

pub mod ecs;
pub mod physics;

// Re-export commonly used types
pub use ecs::components::physics::{Body, BodyKind, MIN_BODY_SIZE};
pub use ecs::components::transform::Transform;

pub use physics::collider::Aabb;
pub use physics::contact::Contact;
pub use physics::{PhysicsConfig, PhysicsError, PhysicsWorld};

// Re-export glam for convenience
pub use glam;
