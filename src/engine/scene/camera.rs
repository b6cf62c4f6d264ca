use crate::ensure_aligned;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

/// Perspective camera with an explicit eye and look-at target.
pub struct Camera {
    pub projection: Perspective3<f32>,
    eye: Vector3<f32>,
    target: Vector3<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Camera {
            projection: Perspective3::new(800.0 / 600.0, 60f32.to_radians(), 0.01, 1000.0),
            eye: Vector3::new(0.0, 10.0, 25.0),
            target: Vector3::zeros(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.projection = Perspective3::new(width / height, 60f32.to_radians(), 0.01, 1000.0);
    }

    pub fn look_at(&mut self, eye: Vector3<f32>, target: Vector3<f32>) {
        self.eye = eye;
        self.target = target;
    }

    pub fn eye(&self) -> Vector3<f32> {
        self.eye
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(
            &Point3::from(self.eye),
            &Point3::from(self.target),
            &Vector3::y(),
        )
        .to_homogeneous()
    }

    /// Projection matrix remapped to wgpu clip space (depth 0..1 instead of
    /// OpenGL's -1..1).
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        opengl_to_wgpu() * self.projection.to_homogeneous()
    }

    /// Turns a cursor position in window pixels into a world-space ray,
    /// used for click picking. Returns the ray origin and unit direction.
    pub fn screen_ray(
        &self,
        screen: Vector2<f32>,
        width: f32,
        height: f32,
    ) -> Option<(Point3<f32>, Vector3<f32>)> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let ndc = Vector2::new(
            screen.x / width * 2.0 - 1.0,
            1.0 - screen.y / height * 2.0,
        );

        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let near = inverse.transform_point(&Point3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.transform_point(&Point3::new(ndc.x, ndc.y, 1.0));

        let direction = (far - near).normalize();
        direction.norm().is_finite().then_some((near, direction))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new()
    }
}

fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.5, 0.5, //
        0.0, 0.0, 0.0, 1.0, //
    )
}

#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pos: Vector3<f32>,
    _padding: u32,
    view_mat: Matrix4<f32>,
    projection_mat: Matrix4<f32>,
    pub proj_view_mat: Matrix4<f32>,
}

ensure_aligned!(CameraUniform { pos, view_mat, projection_mat, proj_view_mat }, align <= 16 * 13 => size);

impl CameraUniform {
    pub fn empty() -> Self {
        CameraUniform {
            pos: Vector3::zeros(),
            _padding: 0,
            view_mat: Matrix4::identity(),
            projection_mat: Matrix4::identity(),
            proj_view_mat: Matrix4::identity(),
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.pos = camera.eye();
        self.view_mat = camera.view_matrix();
        self.projection_mat = camera.projection_matrix();
        self.proj_view_mat = self.projection_mat * self.view_mat;
    }
}
