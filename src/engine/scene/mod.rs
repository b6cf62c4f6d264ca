//! The visual half of the sandbox.
//!
//! [`SceneHost`] owns the scene graph, camera and light rig. Everything in
//! here is plain CPU state; the GPU side of a node is uploaded lazily by
//! the renderer once a device exists and torn down when the node is
//! removed, so scene manipulation works headless.

pub mod camera;
pub mod light;
pub mod mesh;

pub use camera::*;
pub use light::*;
pub use mesh::*;

use crate::core::Transform;
use crate::engine::rendering::GpuMesh;
use nalgebra::Vector3;
use slotmap::{HopSlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Opaque handle to a node in the scene graph.
    pub struct NodeId;
}

/// A single drawable: a triangle mesh with a transform and a flat color.
pub struct MeshNode {
    pub label: String,
    pub transform: Transform,
    pub mesh: MeshData,
    pub color: Vector3<f32>,
    pub(crate) gpu: Option<GpuMesh>,
}

impl MeshNode {
    pub fn new<S: Into<String>>(label: S, mesh: MeshData, color: Vector3<f32>) -> Self {
        MeshNode {
            label: label.into(),
            transform: Transform::new(),
            mesh,
            color,
            gpu: None,
        }
    }

    pub fn at(mut self, position: Vector3<f32>) -> Self {
        self.transform.set_position_vec(position);
        self
    }

    fn release_gpu(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
        }
    }
}

pub struct SceneHost {
    nodes: HopSlotMap<NodeId, MeshNode>,
    pub camera: Camera,
    pub lights: SmallVec<[PointLightUniform; 4]>,
}

impl Default for SceneHost {
    fn default() -> Self {
        SceneHost::new()
    }
}

impl SceneHost {
    pub fn new() -> Self {
        SceneHost {
            nodes: HopSlotMap::with_key(),
            camera: Camera::new(),
            lights: SmallVec::new(),
        }
    }

    pub fn add_to_scene(&mut self, node: MeshNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Detaches the node and frees its GPU buffers if it was ever
    /// uploaded. Removing an unknown or already-removed node is a no-op.
    pub fn remove_from_scene(&mut self, id: NodeId) -> bool {
        match self.nodes.remove(id) {
            Some(mut node) => {
                node.release_gpu();
                true
            }
            None => false,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&MeshNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut MeshNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &MeshNode)> {
        self.nodes.iter()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut MeshNode> {
        self.nodes.values_mut()
    }

    pub fn add_point_light(&mut self, light: PointLightUniform) {
        self.lights.push(light);
    }
}
