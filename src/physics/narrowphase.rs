//! Narrowphase collision detection: swept ray-vs-box and box-vs-box tests.
//!
//! The box-vs-box sweep is reduced to a single ray-vs-box query by
//! Minkowski expansion: a box of size S moving along V hits a box of size
//! T exactly when a ray from S's center along V hits a box of size `S + T`
//! placed at T's position minus S's half extents.

use glam::Vec2;
use tracing::trace;

use crate::ecs::components::physics::{Body, BodyKind};

/// Result of a ray-vs-box intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayBoxHit {
    /// World-space point where the ray first touches the box.
    pub point: Vec2,
    /// Face normal at entry: an axis-aligned unit vector, or `(0,0)` when
    /// the ray enters exactly through a corner.
    pub normal: Vec2,
    /// Entry time in ray lengths.
    pub t_near: f32,
    /// Exit time in ray lengths.
    pub t_far: f32,
}

/// Result of a swept box-vs-box test.
#[derive(Debug, Clone, Copy)]
pub struct SweepHit {
    pub point: Vec2,
    pub normal: Vec2,
    /// Time of impact as a fraction of the tick, in `[0, 1)`.
    pub time: f32,
}

/// Slab-method ray-vs-box intersection.
///
/// Zero direction components are permitted: `1.0 / 0.0` is an IEEE-754
/// infinity and the slab arithmetic stays well-defined, except when the
/// matching position offset is also zero, in which case the resulting NaN
/// is caught and reported as a miss. Inputs must be finite.
pub fn ray_vs_box(
    ray_origin: Vec2,
    ray_dir: Vec2,
    box_pos: Vec2,
    box_size: Vec2,
) -> Option<RayBoxHit> {
    // The slab arithmetic drifts when the origin or the box sits on or
    // across zero; shift both out of that quadrant and unshift the contact
    // point afterwards. Entry/exit times are translation-invariant.
    let shift = if ray_origin.x <= 0.0
        || ray_origin.y <= 0.0
        || box_pos.x <= 0.0
        || box_pos.y <= 0.0
    {
        box_size - ray_origin
    } else {
        Vec2::ZERO
    };
    let origin = ray_origin + shift;
    let box_pos = box_pos + shift;

    let inv_dir = Vec2::ONE / ray_dir;

    let mut t_near = (box_pos - origin) * inv_dir;
    let mut t_far = (box_pos + box_size - origin) * inv_dir;

    // 0 * inf: the ray runs exactly along a slab boundary.
    if t_near.is_nan() || t_far.is_nan() {
        return None;
    }

    if t_near.x > t_far.x {
        std::mem::swap(&mut t_near.x, &mut t_far.x);
    }
    if t_near.y > t_far.y {
        std::mem::swap(&mut t_near.y, &mut t_far.y);
    }

    if t_near.x > t_far.y || t_near.y > t_far.x {
        return None;
    }

    let t_hit_near = t_near.x.max(t_near.y);
    let t_hit_far = t_far.x.min(t_far.y);

    // Box entirely behind the ray.
    if t_hit_far < 0.0 {
        return None;
    }

    let point = origin + ray_dir * t_hit_near - shift;

    let normal = if t_near.x > t_near.y {
        if inv_dir.x < 0.0 {
            Vec2::X
        } else {
            Vec2::NEG_X
        }
    } else if t_near.x < t_near.y {
        if inv_dir.y < 0.0 {
            Vec2::Y
        } else {
            Vec2::NEG_Y
        }
    } else {
        // Corner entry; resolving it is the solver's call.
        Vec2::ZERO
    };

    Some(RayBoxHit {
        point,
        normal,
        t_near: t_hit_near,
        t_far: t_hit_far,
    })
}

/// Swept test: does `subject`, moving at its velocity for one tick of
/// length `dt`, touch `obstacle`?
///
/// Only dynamic bodies with non-zero velocity or a pending size change are
/// swept. The obstacle is treated as stationary for the duration of the
/// sweep, even when it is itself dynamic.
pub fn sweep_test(
    subject: &Body,
    subject_pos: Vec2,
    obstacle: &Body,
    obstacle_pos: Vec2,
    dt: f32,
) -> Option<SweepHit> {
    if subject.kind != BodyKind::Dynamic {
        return None;
    }
    if subject.velocity == Vec2::ZERO && subject.size_delta() == Vec2::ZERO {
        return None;
    }

    let expanded_pos = obstacle_pos - subject.origin();
    let expanded_size = obstacle.size() + subject.size();

    let ray_origin = subject_pos + subject.origin();
    let ray_dir = subject.velocity * dt;

    let hit = ray_vs_box(ray_origin, ray_dir, expanded_pos, expanded_size)?;
    if !(0.0..1.0).contains(&hit.t_near) {
        // Near-degenerate sweeps can produce entry times far outside the
        // tick. Discarded, never clamped.
        trace!(time = hit.t_near, "discarding contact outside the tick window");
        return None;
    }

    Some(SweepHit {
        point: hit.point,
        normal: hit.normal,
        time: hit.t_near,
    })
}
