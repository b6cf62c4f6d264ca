//! Procedural triangle meshes for the primitive solids.
//!
//! Every generator produces positions, normals and texture coordinates in
//! object space, centered on the origin, sized so the physics shapes built
//! from the same scalars line up with what is drawn.

use crate::core::Vertex3D;
use nalgebra::{Vector2, Vector3};
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Largest distance of any vertex from the object-space origin.
    pub fn max_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position.norm())
            .fold(0.0, f32::max)
    }

    fn push_quad(&mut self, corners: [Vector3<f32>; 4], normal: Vector3<f32>) {
        let base = self.vertices.len() as u32;
        let uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 1.0),
        ];
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(Vertex3D::new(corner, normal, uv));
        }
        self.indices
            .extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }

    /// Axis-aligned box with the given full extents and flat face normals.
    pub fn cuboid(extent: Vector3<f32>) -> Self {
        let h = extent * 0.5;
        let mut mesh = MeshData::default();

        // (face normal, in-plane u axis, in-plane v axis)
        let faces = [
            (Vector3::x(), Vector3::z(), Vector3::y()),
            (-Vector3::x(), -Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::x(), Vector3::z()),
            (-Vector3::y(), Vector3::x(), -Vector3::z()),
            (Vector3::z(), -Vector3::x(), Vector3::y()),
            (-Vector3::z(), Vector3::x(), Vector3::y()),
        ];

        for (normal, u, v) in faces {
            let n = normal.component_mul(&h);
            let u = u.component_mul(&h);
            let v = v.component_mul(&h);
            mesh.push_quad([n - u - v, n + u - v, n - u + v, n + u + v], normal);
        }

        mesh
    }

    /// UV sphere with smooth normals.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let mut mesh = MeshData::default();

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let dir = Vector3::new(
                    phi.sin() * theta.cos(),
                    phi.cos(),
                    phi.sin() * theta.sin(),
                );
                mesh.vertices.push(Vertex3D::new(
                    dir * radius,
                    dir,
                    Vector2::new(
                        seg as f32 / segments as f32,
                        ring as f32 / rings as f32,
                    ),
                ));
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let a = ring * (segments + 1) + seg;
                let b = a + 1;
                let c = a + segments + 1;
                let d = c + 1;
                mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        mesh
    }

    /// Cylinder along the y axis: smooth side normals, flat caps.
    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        let mut mesh = MeshData::default();
        let half = height * 0.5;

        // side
        for seg in 0..=segments {
            let theta = TAU * seg as f32 / segments as f32;
            let dir = Vector3::new(theta.cos(), 0.0, theta.sin());
            let u = seg as f32 / segments as f32;
            mesh.vertices.push(Vertex3D::new(
                dir * radius + Vector3::new(0.0, -half, 0.0),
                dir,
                Vector2::new(u, 1.0),
            ));
            mesh.vertices.push(Vertex3D::new(
                dir * radius + Vector3::new(0.0, half, 0.0),
                dir,
                Vector2::new(u, 0.0),
            ));
        }
        for seg in 0..segments {
            let a = seg * 2;
            mesh.indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
        }

        mesh.push_cap(radius, half, segments, Vector3::y());
        mesh.push_cap(radius, -half, segments, -Vector3::y());

        mesh
    }

    /// Cone along the y axis with the apex on top and a flat base cap.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        let mut mesh = MeshData::default();
        let half = height * 0.5;

        // one apex vertex per segment keeps the slant normals per-face
        for seg in 0..segments {
            let t0 = TAU * seg as f32 / segments as f32;
            let t1 = TAU * (seg + 1) as f32 / segments as f32;
            let tm = (t0 + t1) * 0.5;

            let base0 = Vector3::new(t0.cos() * radius, -half, t0.sin() * radius);
            let base1 = Vector3::new(t1.cos() * radius, -half, t1.sin() * radius);
            let apex = Vector3::new(0.0, half, 0.0);

            let n0 = Vector3::new(t0.cos() * height, radius, t0.sin() * height).normalize();
            let n1 = Vector3::new(t1.cos() * height, radius, t1.sin() * height).normalize();
            let nm = Vector3::new(tm.cos() * height, radius, tm.sin() * height).normalize();

            let base = mesh.vertices.len() as u32;
            mesh.vertices
                .push(Vertex3D::new(base0, n0, Vector2::new(0.0, 1.0)));
            mesh.vertices
                .push(Vertex3D::new(base1, n1, Vector2::new(1.0, 1.0)));
            mesh.vertices
                .push(Vertex3D::new(apex, nm, Vector2::new(0.5, 0.0)));
            mesh.indices.extend_from_slice(&[base, base + 2, base + 1]);
        }

        mesh.push_cap(radius, -half, segments, -Vector3::y());

        mesh
    }

    /// Torus around the y axis. `major_radius` is the distance from the
    /// center to the middle of the tube.
    pub fn torus(
        major_radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        let mut mesh = MeshData::default();

        for tub in 0..=tubular_segments {
            let u = TAU * tub as f32 / tubular_segments as f32;
            let center = Vector3::new(u.cos() * major_radius, 0.0, u.sin() * major_radius);
            for rad in 0..=radial_segments {
                let v = TAU * rad as f32 / radial_segments as f32;
                let normal = Vector3::new(u.cos() * v.cos(), v.sin(), u.sin() * v.cos());
                mesh.vertices.push(Vertex3D::new(
                    center + normal * tube_radius,
                    normal,
                    Vector2::new(
                        tub as f32 / tubular_segments as f32,
                        rad as f32 / radial_segments as f32,
                    ),
                ));
            }
        }

        for tub in 0..tubular_segments {
            for rad in 0..radial_segments {
                let a = tub * (radial_segments + 1) + rad;
                let b = a + 1;
                let c = a + radial_segments + 1;
                let d = c + 1;
                mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        mesh
    }

    /// Flat square in the xz plane facing up, e.g. the ground.
    pub fn plane(half_extent: f32) -> Self {
        let mut mesh = MeshData::default();
        let h = half_extent;
        mesh.push_quad(
            [
                Vector3::new(-h, 0.0, -h),
                Vector3::new(h, 0.0, -h),
                Vector3::new(-h, 0.0, h),
                Vector3::new(h, 0.0, h),
            ],
            Vector3::y(),
        );
        mesh
    }

    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, normal: Vector3<f32>) {
        let center = self.vertices.len() as u32;
        self.vertices.push(Vertex3D::new(
            Vector3::new(0.0, y, 0.0),
            normal,
            Vector2::new(0.5, 0.5),
        ));

        for seg in 0..=segments {
            let theta = TAU * seg as f32 / segments as f32;
            self.vertices.push(Vertex3D::new(
                Vector3::new(theta.cos() * radius, y, theta.sin() * radius),
                normal,
                Vector2::new(theta.cos() * 0.5 + 0.5, theta.sin() * 0.5 + 0.5),
            ));
        }

        for seg in 0..segments {
            let a = center + 1 + seg;
            self.indices.extend_from_slice(&[center, a, a + 1]);
        }
    }
}
