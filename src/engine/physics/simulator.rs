use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::prelude::*;

/// Downward gravity magnitude the sandbox starts with and resets to.
pub const DEFAULT_GRAVITY: f32 = 9.8;
pub const DEFAULT_RESTITUTION: f32 = 0.30;
pub const DEFAULT_FRICTION: f32 = 0.30;
pub const DEFAULT_BODY_MASS: f32 = 5.0;

/// Simulation advances in increments of this, regardless of frame rate.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
/// Upper bound on catch-up steps per frame; surplus time is dropped so a
/// stalled frame can never snowball into a longer stall.
pub const MAX_SUBSTEPS: u32 = 3;

/// A rigid body together with its collider. Both are created and removed
/// as one unit; handing out the pair keeps either from leaking alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BodyHandle {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

pub struct PhysicsSimulator {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: Box<dyn BroadPhase>,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    restitution: f32,
    friction: f32,
    paused: bool,
    time_scale: f32,
    accumulator: f32,
}

impl Default for PhysicsSimulator {
    fn default() -> Self {
        PhysicsSimulator {
            gravity: Vector3::new(0.0, -DEFAULT_GRAVITY, 0.0),
            rigid_body_set: RigidBodySet::default(),
            collider_set: ColliderSet::default(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::default(),
            island_manager: IslandManager::default(),
            broad_phase: Box::<DefaultBroadPhase>::default(),
            narrow_phase: NarrowPhase::default(),
            impulse_joint_set: ImpulseJointSet::default(),
            multibody_joint_set: MultibodyJointSet::default(),
            ccd_solver: CCDSolver::default(),
            query_pipeline: QueryPipeline::default(),
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            paused: false,
            time_scale: 1.0,
            accumulator: 0.0,
        }
    }
}

impl PhysicsSimulator {
    /// Advances the simulation by `real_dt` seconds of wall-clock time,
    /// scaled by the current time scale and drained in increments of
    /// `fixed_dt`. At most `max_substeps` increments run per call.
    ///
    /// While paused this is a no-op; callers keep rendering and syncing so
    /// a paused scene stays visible but static.
    pub fn step(&mut self, fixed_dt: f32, real_dt: f32, max_substeps: u32) {
        if self.paused {
            return;
        }

        self.accumulator += real_dt * self.time_scale;
        self.integration_parameters.dt = fixed_dt;

        let mut substeps = 0;
        while self.accumulator >= fixed_dt && substeps < max_substeps {
            self.accumulator -= fixed_dt;
            self.step_once();
            substeps += 1;
        }

        // whatever a long frame left over is dropped, not replayed
        self.accumulator = self.accumulator.min(fixed_dt);
    }

    fn step_once(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            self.broad_phase.as_mut(),
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(), // no hooks
            &(), // no events
        );
        self.query_pipeline.update(&self.collider_set)
    }

    /// Inserts a dynamic body with the given collision shape at `position`
    /// and returns the paired handles.
    pub fn create_body(
        &mut self,
        shape: SharedShape,
        mass: f32,
        position: Vector3<f32>,
    ) -> BodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic().translation(position).build();
        let body = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::new(shape)
            .mass(mass)
            .restitution(self.restitution)
            .friction(self.friction)
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);

        BodyHandle { body, collider }
    }

    /// Inserts a fixed body, e.g. the ground plane. Fixed bodies survive
    /// [`PhysicsSimulator::clear_dynamic_bodies`].
    pub fn create_static_body(&mut self, shape: SharedShape, position: Vector3<f32>) -> BodyHandle {
        let rigid_body = RigidBodyBuilder::fixed().translation(position).build();
        let body = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::new(shape)
            .restitution(self.restitution)
            .friction(self.friction)
            .build();
        let collider =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);

        BodyHandle { body, collider }
    }

    /// Removes a body and its attached collider. Unknown handles are
    /// ignored.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.rigid_body_set.remove(
            handle.body,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Removes every non-fixed body from the world.
    pub fn clear_dynamic_bodies(&mut self) {
        let dynamic: Vec<RigidBodyHandle> = self
            .rigid_body_set
            .iter()
            .filter(|(_, body)| !body.is_fixed())
            .map(|(handle, _)| handle)
            .collect();

        for handle in dynamic {
            self.rigid_body_set.remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
        }
    }

    /// Reads the current position and orientation of a body.
    pub fn body_transform(&self, handle: BodyHandle) -> Option<(Vector3<f32>, UnitQuaternion<f32>)> {
        let body = self.rigid_body_set.get(handle.body)?;
        Some((*body.translation(), *body.rotation()))
    }

    /// Stores an opaque tag on the body's collider, readable back from
    /// ray-cast hits.
    pub fn set_body_tag(&mut self, handle: BodyHandle, tag: u128) {
        if let Some(collider) = self.collider_set.get_mut(handle.collider) {
            collider.user_data = tag;
        }
    }

    pub fn body_tag(&self, collider: ColliderHandle) -> Option<u128> {
        Some(self.collider_set.get(collider)?.user_data)
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.gravity = Vector3::new(x, y, z);
    }

    /// Updates the shared material defaults and retrofits them onto every
    /// collider already in the world, so slider changes act on existing
    /// objects too.
    pub fn set_material_properties(&mut self, restitution: f32, friction: f32) {
        self.restitution = restitution.max(0.0);
        self.friction = friction.max(0.0);

        for (_, collider) in self.collider_set.iter_mut() {
            collider.set_restitution(self.restitution);
            collider.set_friction(self.friction);
        }
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count()
    }

    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_toi: f32,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(f32, ColliderHandle)> {
        let (collider, distance) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            ray,
            max_toi,
            solid,
            filter,
        )?;

        Some((distance, collider))
    }
}
