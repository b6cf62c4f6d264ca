use crate::ensure_aligned;
use nalgebra::Vector3;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub pos: Vector3<f32>,
    pub radius: f32,
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub specular_color: Vector3<f32>,
    pub specular_intensity: f32,
}

ensure_aligned!(PointLightUniform { pos, color, specular_color }, align <= 16 * 3 => size);

impl PointLightUniform {
    pub const fn zero() -> Self {
        PointLightUniform {
            pos: Vector3::new(0.0, 0.0, 0.0),
            radius: 0.0,
            color: Vector3::new(0.0, 0.0, 0.0),
            intensity: 0.0,
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            specular_intensity: 0.0,
        }
    }

    pub fn new(pos: Vector3<f32>, color: Vector3<f32>, radius: f32, intensity: f32) -> Self {
        PointLightUniform {
            pos,
            radius: radius.max(0.0),
            color,
            intensity: intensity.max(0.0),
            specular_color: Vector3::new(1.0, 1.0, 1.0),
            specular_intensity: 1.0,
        }
    }
}
