//! 2D swept-rectangle collision detection and resolution.
//!
//! # Architecture
//!
//! Each fixed step runs the pipeline once, in this order:
//!
//! 1. Clear the per-tick contact table
//! 2. For each dynamic body, in world order:
//!    broadphase swept-region filter → narrowphase Minkowski sweep per
//!    candidate → sort contacts by time of impact → sequential velocity
//!    correction
//! 3. Integrate positions
//! 4. Clear size deltas
//!
//! Subjects are processed sequentially; a body resolved later in the pass
//! observes the corrected velocities of bodies resolved before it. That
//! ordering is part of the engine's determinism contract — do not
//! parallelize the subject loop without replacing it with an explicit
//! two-phase scheme.

pub mod body;
pub mod broadphase;
pub mod collider;
pub mod contact;
pub mod narrowphase;
pub mod solver;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::ecs::components::physics::{Body, BodyKind};
use crate::ecs::components::transform::Transform;

use self::broadphase::SweptRegionFilter;
use self::contact::Contact;

/// Errors surfaced by the engine's entry points.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// The entity is missing the `Transform` or `Body` component.
    #[error("entity {0:?} has no transform or body")]
    MissingBody(hecs::Entity),
}

/// Configuration for the collision engine.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Fixed timestep for collision updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
        }
    }
}

/// The collision engine: per-tick contact detection and velocity
/// correction over bodies stored in a `hecs::World`.
///
/// Bodies are owned by the caller's world; the engine borrows them for
/// the duration of a step and keeps only the per-tick contact table.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    broadphase: SweptRegionFilter,
    contacts: HashMap<hecs::Entity, Vec<Contact>>,
}

impl PhysicsWorld {
    /// Create a new collision engine with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            broadphase: SweptRegionFilter::new(),
            contacts: HashMap::new(),
        }
    }

    /// Step the engine forward by `delta_time` seconds.
    ///
    /// Uses a fixed timestep accumulator so results do not depend on
    /// frame pacing.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f64) {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.fixed_step(world, self.config.fixed_timestep as f32);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            debug!(
                accumulator = self.accumulator,
                "collision accumulator clamped, simulation running behind"
            );
            self.accumulator = 0.0;
        }
    }

    /// Resolve a single tick of length `dt` for every dynamic body.
    pub fn fixed_step(&mut self, world: &mut hecs::World, dt: f32) {
        self.contacts.clear();

        // Snapshot the subject order up front; resolution mutates bodies.
        let bodies: Vec<hecs::Entity> = world
            .query::<(&Transform, &Body)>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();

        for entity in bodies {
            let is_subject = world
                .get::<&Body>(entity)
                .map(|body| body.kind == BodyKind::Dynamic)
                .unwrap_or(false);
            if !is_subject {
                continue;
            }
            let contacts = solver::resolve_subject(world, entity, &self.broadphase, dt);
            self.contacts.insert(entity, contacts);
        }

        body::integrate_positions(world, dt);
        body::clear_size_deltas(world);
    }

    /// Resolve one subject immediately, outside the per-tick pass.
    ///
    /// Non-dynamic bodies are valid to ask about; they produce no
    /// contacts and are left untouched. Errors only when the entity
    /// lacks the required components.
    pub fn resolve(
        &mut self,
        world: &mut hecs::World,
        entity: hecs::Entity,
        dt: f32,
    ) -> Result<&[Contact], PhysicsError> {
        let kind = {
            let body = world
                .get::<&Body>(entity)
                .map_err(|_| PhysicsError::MissingBody(entity))?;
            if world.get::<&Transform>(entity).is_err() {
                return Err(PhysicsError::MissingBody(entity));
            }
            body.kind
        };

        let contacts = if kind == BodyKind::Dynamic {
            solver::resolve_subject(world, entity, &self.broadphase, dt)
        } else {
            Vec::new()
        };
        self.contacts.insert(entity, contacts);
        Ok(self.contacts.get(&entity).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Ordered contacts recorded for `entity` this tick. Empty for bodies
    /// that were not resolved or hit nothing.
    pub fn contacts(&self, entity: hecs::Entity) -> &[Contact] {
        self.contacts.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(config.max_substeps, 4);
    }

    #[test]
    fn test_subject_stops_at_wall() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let subject = world.spawn((Transform::from_position(Vec2::new(0.0, 4.0)), {
            let mut body = Body::new_dynamic(Vec2::splat(2.0));
            body.velocity = Vec2::new(8.0, 0.0);
            body
        }));
        let wall = world.spawn((
            Transform::from_position(Vec2::new(6.0, 0.0)),
            Body::new_static(Vec2::new(2.0, 20.0)),
        ));

        // First tick: contact at half the tick, velocity halved, subject
        // ends the tick kissing the wall.
        physics.fixed_step(&mut world, 1.0);
        {
            let contacts = physics.contacts(subject);
            assert_eq!(contacts.len(), 1);
            assert_eq!(contacts[0].obstacle, wall);
            assert_eq!(contacts[0].normal, Vec2::new(-1.0, 0.0));
            assert!((contacts[0].time - 0.5).abs() < 1e-6);

            let body = world.get::<&Body>(subject).unwrap();
            assert!((body.velocity.x - 4.0).abs() < 1e-5);
        }
        let position = world.get::<&Transform>(subject).unwrap().position;
        assert!((position.x - 4.0).abs() < 1e-5, "position.x = {}", position.x);

        // Second tick: immediate contact, remaining velocity cancelled.
        physics.fixed_step(&mut world, 1.0);
        let contacts = physics.contacts(subject);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].time.abs() < 1e-5);

        let body = world.get::<&Body>(subject).unwrap();
        assert!(body.velocity.x.abs() < 1e-4, "velocity.x = {}", body.velocity.x);
        let position = world.get::<&Transform>(subject).unwrap().position;
        assert!((position.x - 4.0).abs() < 1e-3, "position.x = {}", position.x);
    }

    #[test]
    fn test_static_body_never_subject() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let rock = world.spawn((Transform::from_position(Vec2::ZERO), {
            let mut body = Body::new_static(Vec2::splat(2.0));
            body.velocity = Vec2::new(5.0, 0.0);
            body
        }));
        world.spawn((
            Transform::from_position(Vec2::new(3.0, 0.0)),
            Body::new_static(Vec2::splat(2.0)),
        ));

        physics.fixed_step(&mut world, 1.0);

        assert!(physics.contacts(rock).is_empty());
        assert_eq!(world.get::<&Body>(rock).unwrap().velocity, Vec2::new(5.0, 0.0));
        assert_eq!(world.get::<&Transform>(rock).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_dynamic_obstacle_swept_as_stationary() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let runner = world.spawn((Transform::from_position(Vec2::ZERO), {
            let mut body = Body::new_dynamic(Vec2::splat(2.0));
            body.velocity = Vec2::new(8.0, 0.0);
            body
        }));
        let idler = world.spawn((
            Transform::from_position(Vec2::new(6.0, 0.0)),
            Body::new_dynamic(Vec2::splat(2.0)),
        ));

        physics.fixed_step(&mut world, 1.0);

        // The moving body resolves against the idle one; the idle body
        // has nothing to sweep and stays put.
        assert_eq!(physics.contacts(runner).len(), 1);
        assert!(physics.contacts(idler).is_empty());
        assert!((world.get::<&Body>(runner).unwrap().velocity.x - 4.0).abs() < 1e-5);
        assert_eq!(world.get::<&Body>(idler).unwrap().velocity, Vec2::ZERO);
        assert_eq!(
            world.get::<&Transform>(idler).unwrap().position,
            Vec2::new(6.0, 0.0)
        );
    }

    #[test]
    fn test_step_accumulator_caps_substeps() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let entity = world.spawn((Transform::default(), {
            let mut body = Body::new_dynamic(Vec2::splat(2.0));
            body.velocity = Vec2::new(60.0, 0.0);
            body
        }));

        // A full second of backlog only buys max_substeps ticks.
        physics.step(&mut world, 1.0);

        let position = world.get::<&Transform>(entity).unwrap().position;
        assert!(
            (position.x - 4.0).abs() < 1e-3,
            "expected 4 substeps of motion, got x = {}",
            position.x
        );
    }

    #[test]
    fn test_contacts_cleared_each_tick() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let subject = world.spawn((Transform::from_position(Vec2::new(0.0, 4.0)), {
            let mut body = Body::new_dynamic(Vec2::splat(2.0));
            body.velocity = Vec2::new(8.0, 0.0);
            body
        }));
        world.spawn((
            Transform::from_position(Vec2::new(6.0, 0.0)),
            Body::new_static(Vec2::new(2.0, 20.0)),
        ));

        physics.fixed_step(&mut world, 1.0);
        assert!(!physics.contacts(subject).is_empty());

        // Point the subject away from the wall; the stale contact must
        // not survive into the next tick.
        world.get::<&mut Body>(subject).unwrap().velocity = Vec2::new(-8.0, 0.0);
        physics.fixed_step(&mut world, 1.0);
        assert!(physics.contacts(subject).is_empty());
    }

    #[test]
    fn test_resolve_missing_body_errors() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());
        let bare = world.spawn((Transform::default(),));

        let result = physics.resolve(&mut world, bare, 1.0);
        assert!(matches!(result, Err(PhysicsError::MissingBody(e)) if e == bare));
    }

    #[test]
    fn test_resolve_static_returns_empty() {
        let mut world = hecs::World::new();
        let mut physics = PhysicsWorld::new(PhysicsConfig::default());

        let rock = world.spawn((
            Transform::from_position(Vec2::ZERO),
            Body::new_static(Vec2::splat(2.0)),
        ));

        let contacts = physics.resolve(&mut world, rock, 1.0).unwrap();
        assert!(contacts.is_empty());
    }
}
