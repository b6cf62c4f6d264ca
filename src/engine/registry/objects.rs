use crate::physics::{BodyHandle, DEFAULT_BODY_MASS, PhysicsSimulator};
use crate::registry::ShapeKind;
use crate::scene::{MeshNode, NodeId, SceneHost};
use itertools::Itertools;
use log::{debug, info, warn};
use nalgebra::Vector3;
use rand::prelude::*;

/// Overall extent a solid gets when the caller doesn't pick one.
pub const DEFAULT_SIZE: f32 = 2.0;
/// Vertical offset added above a clicked anchor so fresh solids never
/// start inside the surface they were dropped on.
pub const SPAWN_CLEARANCE: f32 = 3.0;

const RANDOM_FOOTPRINT: f32 = 8.0;
const RANDOM_HEIGHT_MIN: f32 = 6.0;
const RANDOM_HEIGHT_MAX: f32 = 14.0;
const RANDOM_SIZE_MIN: f32 = 1.0;
const RANDOM_SIZE_MAX: f32 = 3.0;

/// Unique, monotonically increasing object identifier. Never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectId(pub u64);

/// One spawned solid: its scene node and its rigid body, owned as a unit.
#[derive(Debug)]
pub struct TrackedObject {
    pub id: ObjectId,
    pub kind: ShapeKind,
    pub node: NodeId,
    pub body: BodyHandle,
}

/// Insertion-ordered collection of every live [`TrackedObject`].
///
/// The registry is the only place allowed to create or destroy the
/// node/body pair; everything it hands out is an id that stays valid
/// until the object is removed.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: Vec<TrackedObject>,
    next_id: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        ObjectRegistry::default()
    }

    /// Spawns a solid of `kind` at `position` with overall extent `size`.
    ///
    /// Degenerate input (non-finite position, non-positive or non-finite
    /// size) rejects the spawn: nothing is created and `None` is
    /// returned. The visual mesh and the collision shape are derived from
    /// the same scalars, so they coincide by construction.
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsSimulator,
        scene: &mut SceneHost,
        kind: ShapeKind,
        position: Vector3<f32>,
        size: f32,
    ) -> Option<ObjectId> {
        if !size.is_finite() || size <= 0.0 || !position.iter().all(|c| c.is_finite()) {
            warn!("Rejecting {kind} spawn at {position:?} with size {size}");
            return None;
        }

        let node = scene.add_to_scene(
            MeshNode::new(kind.name(), kind.build_mesh(size), kind.color()).at(position),
        );
        let body = physics.create_body(kind.collider_shape(size), DEFAULT_BODY_MASS, position);

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        physics.set_body_tag(body, id.0 as u128);

        debug!("Spawned {kind} #{} at {position:?}", id.0);
        self.objects.push(TrackedObject {
            id,
            kind,
            node,
            body,
        });

        Some(id)
    }

    /// Spawns a `kind` of random size at a random spot in a bounded band
    /// above the ground plane.
    pub fn spawn_random_above(
        &mut self,
        physics: &mut PhysicsSimulator,
        scene: &mut SceneHost,
        kind: ShapeKind,
    ) -> Option<ObjectId> {
        let mut rng = thread_rng();
        let position = Vector3::new(
            rng.gen_range(-RANDOM_FOOTPRINT..RANDOM_FOOTPRINT),
            rng.gen_range(RANDOM_HEIGHT_MIN..RANDOM_HEIGHT_MAX),
            rng.gen_range(-RANDOM_FOOTPRINT..RANDOM_FOOTPRINT),
        );
        let size = rng.gen_range(RANDOM_SIZE_MIN..RANDOM_SIZE_MAX);

        self.spawn(physics, scene, kind, position, size)
    }

    /// Spawns a default-sized `kind` a fixed clearance above `anchor`,
    /// e.g. the point a click hit on the ground.
    pub fn spawn_above_anchor(
        &mut self,
        physics: &mut PhysicsSimulator,
        scene: &mut SceneHost,
        kind: ShapeKind,
        anchor: Vector3<f32>,
    ) -> Option<ObjectId> {
        let position = anchor + Vector3::new(0.0, SPAWN_CLEARANCE, 0.0);
        self.spawn(physics, scene, kind, position, DEFAULT_SIZE)
    }

    /// Copies every tracked body's position and orientation onto its
    /// scene node. Must run after the physics step and before rendering;
    /// creates and destroys nothing.
    pub fn sync_all(&self, physics: &PhysicsSimulator, scene: &mut SceneHost) {
        for object in &self.objects {
            let Some((position, rotation)) = physics.body_transform(object.body) else {
                continue;
            };
            let Some(node) = scene.node_mut(object.node) else {
                continue;
            };

            node.transform.set_position_vec(position);
            node.transform.set_rotation(rotation);
        }
    }

    /// Removes one object: scene node, rigid body and registry entry go
    /// together. Removing an id that is no longer tracked is a no-op, so
    /// double-fired UI events are harmless.
    pub fn remove(
        &mut self,
        physics: &mut PhysicsSimulator,
        scene: &mut SceneHost,
        id: ObjectId,
    ) -> bool {
        let Some((index, _)) = self.objects.iter().find_position(|o| o.id == id) else {
            return false;
        };

        let object = self.objects.remove(index);
        scene.remove_from_scene(object.node);
        physics.remove_body(object.body);

        debug!("Removed {} #{}", object.kind, object.id.0);
        true
    }

    /// Removes every tracked object, then sweeps the simulation for
    /// dynamic bodies that slipped out of tracking; none may survive a
    /// clear.
    pub fn clear_all(&mut self, physics: &mut PhysicsSimulator, scene: &mut SceneHost) {
        // remove() mutates the collection, so snapshot the ids first
        let ids: Vec<ObjectId> = self.objects.iter().map(|o| o.id).collect();
        let cleared = ids.len();

        for id in ids {
            self.remove(physics, scene, id);
        }
        physics.clear_dynamic_bodies();

        info!("Cleared {cleared} objects from the sandbox");
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Looks up the object owning the given body tag, as stored on its
    /// collider at spawn time.
    pub fn get_by_tag(&self, tag: u128) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.id.0 as u128 == tag)
    }

    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }
}
