use nalgebra::{Matrix4, Scale3, Translation3, UnitQuaternion, Vector3};

/// Stores the translation, rotation and scale of a scene node.
///
/// The transform keeps a precomputed model matrix so that retrieving it
/// each frame is cheap; the matrix is recalculated whenever a component
/// changes.
#[derive(Debug, Clone)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
    compound_mat: Matrix4<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            compound_mat: Matrix4::identity(),
        }
    }
}

impl Transform {
    /// Creates a new [`Transform`] at the origin with no rotation and a
    /// uniform scale of `1.0`.
    pub fn new() -> Self {
        Transform::default()
    }

    pub fn from_position(pos: Vector3<f32>) -> Self {
        let mut transform = Transform::new();
        transform.set_position_vec(pos);
        transform
    }

    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
        self.recalculate_combined_matrix();
    }

    pub fn position(&self) -> Vector3<f32> {
        self.pos
    }

    /// Adds the given offset to the position.
    pub fn translate(&mut self, other: Vector3<f32>) {
        self.pos += other;
        self.recalculate_combined_matrix();
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rot = rotation;
        self.recalculate_combined_matrix();
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rot
    }

    /// Sets the scale using three independent factors.
    pub fn set_nonuniform_scale_vec(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.recalculate_combined_matrix();
    }

    /// Sets the scale uniformly.
    pub fn set_scale(&mut self, factor: f32) {
        self.set_nonuniform_scale_vec(Vector3::new(factor, factor, factor));
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    fn recalculate_combined_matrix(&mut self) {
        self.compound_mat = Translation3::from(self.pos).to_homogeneous()
            * self.rot.to_homogeneous()
            * Scale3::from(self.scale).to_homogeneous();
    }

    /// Returns a reference to the combined model matrix.
    pub fn full_matrix(&self) -> &Matrix4<f32> {
        &self.compound_mat
    }

    /// Returns the forward direction in world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Returns the up direction in world space.
    pub fn up(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 1.0, 0.0)
    }
}
