//! Sequential contact resolution: time-of-impact ordering and velocity
//! correction.

use std::cmp::Ordering;

use glam::Vec2;

use crate::ecs::components::physics::{Body, BodyKind};
use crate::ecs::components::transform::Transform;

use super::broadphase::SweptRegionFilter;
use super::contact::Contact;
use super::narrowphase;

/// Resolve one subject for the current tick.
///
/// Runs the broadphase filter, sweeps the subject against every candidate,
/// orders the resulting contacts by time of impact and applies velocity
/// corrections in that order, each correction observing the velocity the
/// previous one left behind. The subject's velocity is mutated in place;
/// position integration is the caller's job. Returns the ordered contact
/// list for diagnostics.
pub fn resolve_subject(
    world: &mut hecs::World,
    subject: hecs::Entity,
    broadphase: &SweptRegionFilter,
    dt: f32,
) -> Vec<Contact> {
    let (subject_body, subject_pos) = {
        let body = world.get::<&Body>(subject);
        let transform = world.get::<&Transform>(subject);
        match (body, transform) {
            (Ok(body), Ok(transform)) => (Body::clone(&body), transform.position),
            _ => return Vec::new(),
        }
    };
    if subject_body.kind != BodyKind::Dynamic {
        return Vec::new();
    }

    let mut contacts = Vec::new();
    for candidate in broadphase.candidates(world, subject, dt) {
        let hit = {
            let obstacle = world.get::<&Body>(candidate);
            let transform = world.get::<&Transform>(candidate);
            if let (Ok(obstacle), Ok(transform)) = (obstacle, transform) {
                narrowphase::sweep_test(
                    &subject_body,
                    subject_pos,
                    &obstacle,
                    transform.position,
                    dt,
                )
            } else {
                None
            }
        };
        if let Some(hit) = hit {
            contacts.push(Contact {
                obstacle: candidate,
                point: hit.point,
                normal: hit.normal,
                time: hit.time,
            });
        }
    }

    // Stable: equal times keep candidate iteration order.
    contacts.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    if let Ok(mut body) = world.get::<&mut Body>(subject) {
        let only_contact = contacts.len() == 1;
        for contact in &contacts {
            let normal = if contact.normal == Vec2::ZERO && only_contact {
                // Corner hit with nothing else to lean on: push back along
                // the direction of travel.
                (-body.velocity).clamp(Vec2::NEG_ONE, Vec2::ONE)
            } else {
                contact.normal
            };
            let remaining = 1.0 - contact.time;
            let speed = body.velocity.abs();
            body.velocity += normal * speed * remaining;
        }
    }

    contacts
}
