//! The [`Sandbox`] struct is the application context: it owns the physics
//! simulation, the visual scene and the object registry pairing the two,
//! plus the input state the driver polls.
//!
//! It is constructed once by the driver and passed explicitly to whoever
//! needs it; there is no global instance, and teardown is an ordinary
//! drop after [`Sandbox::clear`].

use crate::input::InputManager;
use crate::physics::{
    DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_RESTITUTION, FIXED_TIMESTEP, MAX_SUBSTEPS,
    PhysicsSimulator,
};
use crate::registry::{ObjectId, ObjectRegistry, ShapeKind};
use crate::scene::SceneHost;
use nalgebra::Vector3;
use std::time::Duration;

pub struct Sandbox {
    pub physics: PhysicsSimulator,
    pub scene: SceneHost,
    pub registry: ObjectRegistry,
    pub input: InputManager,

    requested_shutdown: bool,
}

impl Default for Sandbox {
    fn default() -> Self {
        Sandbox::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        Sandbox {
            physics: PhysicsSimulator::default(),
            scene: SceneHost::new(),
            registry: ObjectRegistry::new(),
            input: InputManager::default(),
            requested_shutdown: false,
        }
    }

    /// One frame worth of simulation: drain the fixed timestep, then copy
    /// body transforms onto the scene nodes. The caller renders afterwards;
    /// that ordering is what keeps the picture in lockstep with the
    /// simulation.
    pub fn advance(&mut self, delta: Duration) {
        self.physics
            .step(FIXED_TIMESTEP, delta.as_secs_f32(), MAX_SUBSTEPS);
        self.registry.sync_all(&self.physics, &mut self.scene);
    }

    /// Prepares for the next frame by resetting per-frame input state.
    pub fn next_frame(&mut self) {
        self.input.next_frame();
    }

    pub fn spawn(
        &mut self,
        kind: ShapeKind,
        position: Vector3<f32>,
        size: f32,
    ) -> Option<ObjectId> {
        self.registry
            .spawn(&mut self.physics, &mut self.scene, kind, position, size)
    }

    pub fn spawn_random_above(&mut self, kind: ShapeKind) -> Option<ObjectId> {
        self.registry
            .spawn_random_above(&mut self.physics, &mut self.scene, kind)
    }

    pub fn spawn_above_anchor(&mut self, kind: ShapeKind, anchor: Vector3<f32>) -> Option<ObjectId> {
        self.registry
            .spawn_above_anchor(&mut self.physics, &mut self.scene, kind, anchor)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.registry
            .remove(&mut self.physics, &mut self.scene, id)
    }

    /// Removes every spawned object, leaving static scenery in place.
    pub fn clear(&mut self) {
        self.registry
            .clear_all(&mut self.physics, &mut self.scene);
    }

    /// Restores the documented defaults: gravity straight down at 9.8,
    /// restitution and friction at 0.30, unpaused, real-time.
    pub fn reset_parameters(&mut self) {
        self.physics.set_gravity(0.0, -DEFAULT_GRAVITY, 0.0);
        self.physics
            .set_material_properties(DEFAULT_RESTITUTION, DEFAULT_FRICTION);
        self.physics.set_paused(false);
        self.physics.set_time_scale(1.0);
    }

    /// Full reset: default parameters and an empty sandbox.
    pub fn reset(&mut self) {
        self.reset_parameters();
        self.clear();
    }

    pub fn shutdown(&mut self) {
        self.requested_shutdown = true;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.requested_shutdown
    }
}
