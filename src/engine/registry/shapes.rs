use crate::scene::MeshData;
use crate::utils::color::hsv_to_rgb;
use nalgebra::Vector3;
use rapier3d::prelude::SharedShape;
use snafu::Snafu;
use std::fmt;
use std::str::FromStr;

/// Fixed angular resolution of the round solids.
pub const RADIAL_SEGMENTS: u32 = 8;

const SPHERE_SEGMENTS: u32 = 16;
const SPHERE_RINGS: u32 = 12;
const TORUS_TUBULAR_SEGMENTS: u32 = 16;

/// The closed set of spawnable solids.
///
/// Each variant derives both its triangle mesh and its collision shape
/// from the same size scalar, so what is drawn and what collides always
/// coincide. Adding a variant without handling it anywhere is a compile
/// error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
}

#[derive(Debug, Snafu)]
#[snafu(display("`{name}` is not a spawnable shape"))]
pub struct UnknownShapeKind {
    name: String,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Torus,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Cone => "Cone",
            ShapeKind::Torus => "Torus",
        }
    }

    /// Fixed presentation color per kind.
    pub fn color(&self) -> Vector3<f32> {
        let hue = match self {
            ShapeKind::Box => 8.0,
            ShapeKind::Sphere => 210.0,
            ShapeKind::Cylinder => 130.0,
            ShapeKind::Cone => 50.0,
            ShapeKind::Torus => 285.0,
        };
        hsv_to_rgb(hue, 0.65, 0.9)
    }

    /// Builds the visual mesh for a solid of overall extent `size`.
    pub fn build_mesh(&self, size: f32) -> MeshData {
        match self {
            ShapeKind::Box => MeshData::cuboid(Vector3::new(size, size, size)),
            ShapeKind::Sphere => MeshData::uv_sphere(size / 2.0, SPHERE_SEGMENTS, SPHERE_RINGS),
            ShapeKind::Cylinder => MeshData::cylinder(size / 2.0, size, RADIAL_SEGMENTS),
            ShapeKind::Cone => MeshData::cone(size / 2.0, size, RADIAL_SEGMENTS),
            ShapeKind::Torus => MeshData::torus(
                size / 2.0,
                size / 4.0,
                RADIAL_SEGMENTS,
                TORUS_TUBULAR_SEGMENTS,
            ),
        }
    }

    /// Builds the collision shape matching [`ShapeKind::build_mesh`] for
    /// the same `size`.
    pub fn collider_shape(&self, size: f32) -> SharedShape {
        let half = size / 2.0;
        match self {
            ShapeKind::Box => SharedShape::cuboid(half, half, half),
            ShapeKind::Sphere => SharedShape::ball(half),
            ShapeKind::Cylinder => SharedShape::cylinder(half, half),
            ShapeKind::Cone => SharedShape::cone(half, half),
            // rapier has no torus shape; a ball of the outer radius
            // stands in for it
            ShapeKind::Torus => SharedShape::ball(half),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownShapeKind { name: s.to_owned() })
    }
}
