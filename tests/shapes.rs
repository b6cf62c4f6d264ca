use nalgebra::Vector3;
use std::collections::HashSet;
use std::str::FromStr;
use tumblebox::registry::ShapeKind;

fn max_abs(mesh: &tumblebox::scene::MeshData, axis: usize) -> f32 {
    mesh.vertices
        .iter()
        .map(|v| v.position[axis].abs())
        .fold(0.0, f32::max)
}

#[test]
fn sphere_visual_and_physical_radii_agree() {
    let size = 2.0;

    let shape = ShapeKind::Sphere.collider_shape(size);
    let ball = shape.as_ball().expect("sphere collider should be a ball");
    assert_eq!(ball.radius, size / 2.0);

    let mesh = ShapeKind::Sphere.build_mesh(size);
    assert!((mesh.max_radius() - size / 2.0).abs() < 1e-4);
}

#[test]
fn box_visual_and_physical_extents_agree() {
    let size = 3.0;

    let shape = ShapeKind::Box.collider_shape(size);
    let cuboid = shape.as_cuboid().expect("box collider should be a cuboid");
    assert_eq!(
        cuboid.half_extents,
        Vector3::new(size / 2.0, size / 2.0, size / 2.0)
    );

    let mesh = ShapeKind::Box.build_mesh(size);
    for axis in 0..3 {
        assert!((max_abs(&mesh, axis) - size / 2.0).abs() < 1e-6);
    }
}

#[test]
fn cylinder_visual_and_physical_dimensions_agree() {
    let size = 2.0;

    let shape = ShapeKind::Cylinder.collider_shape(size);
    let cylinder = shape
        .as_cylinder()
        .expect("cylinder collider should be a cylinder");
    assert_eq!(cylinder.half_height, size / 2.0);
    assert_eq!(cylinder.radius, size / 2.0);

    let mesh = ShapeKind::Cylinder.build_mesh(size);
    assert!((max_abs(&mesh, 1) - size / 2.0).abs() < 1e-6);
    let radial = mesh
        .vertices
        .iter()
        .map(|v| (v.position.x * v.position.x + v.position.z * v.position.z).sqrt())
        .fold(0.0, f32::max);
    assert!((radial - size / 2.0).abs() < 1e-4);
}

#[test]
fn cone_visual_and_physical_dimensions_agree() {
    let size = 2.0;

    let shape = ShapeKind::Cone.collider_shape(size);
    let cone = shape.as_cone().expect("cone collider should be a cone");
    assert_eq!(cone.half_height, size / 2.0);
    assert_eq!(cone.radius, size / 2.0);

    let mesh = ShapeKind::Cone.build_mesh(size);
    assert!((max_abs(&mesh, 1) - size / 2.0).abs() < 1e-6);
}

#[test]
fn torus_collider_is_the_documented_ball_stand_in() {
    let size = 2.0;

    let shape = ShapeKind::Torus.collider_shape(size);
    let ball = shape.as_ball().expect("torus collider should be a ball");
    assert_eq!(ball.radius, size / 2.0);

    // visually the ring spans major + tube radius
    let mesh = ShapeKind::Torus.build_mesh(size);
    assert!((mesh.max_radius() - (size / 2.0 + size / 4.0)).abs() < 1e-4);
}

#[test]
fn shape_names_parse_back_to_their_kind() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::from_str(kind.name()).unwrap(), kind);
        assert_eq!(
            ShapeKind::from_str(&kind.name().to_lowercase()).unwrap(),
            kind
        );
    }

    assert!(ShapeKind::from_str("Pyramid").is_err());
    assert!(ShapeKind::from_str("").is_err());
}

#[test]
fn every_kind_gets_its_own_color() {
    let colors: HashSet<String> = ShapeKind::ALL
        .into_iter()
        .map(|kind| format!("{:?}", kind.color()))
        .collect();
    assert_eq!(colors.len(), ShapeKind::ALL.len());
}
