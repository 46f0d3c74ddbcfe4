//! Per-tick body maintenance: position integration and size-delta
//! bookkeeping.

use crate::ecs::components::physics::{Body, BodyKind};
use crate::ecs::components::transform::Transform;

/// Integrate positions: p += v * dt for every dynamic body.
///
/// Runs after the resolution pass, so each body advances with its
/// corrected velocity. Static and border bodies never move, whatever
/// their velocity field says.
pub fn integrate_positions(world: &mut hecs::World, dt: f32) {
    for (_, (body, transform)) in world.query_mut::<(&Body, &mut Transform)>() {
        if body.kind != BodyKind::Dynamic {
            continue;
        }
        transform.position += body.velocity * dt;
    }
}

/// Clear recorded size changes on all bodies at the end of a tick.
pub fn clear_size_deltas(world: &mut hecs::World) {
    for (_, body) in world.query_mut::<&mut Body>() {
        body.clear_size_delta();
    }
}
