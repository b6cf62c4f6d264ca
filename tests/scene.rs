use nalgebra::{Point3, Vector2, Vector3};
use tumblebox::scene::{Camera, MeshData, MeshNode, SceneHost};

#[test]
fn nodes_can_be_added_and_removed() {
    let mut scene = SceneHost::new();

    let id = scene.add_to_scene(MeshNode::new(
        "Test",
        MeshData::cuboid(Vector3::new(1.0, 1.0, 1.0)),
        Vector3::new(1.0, 0.0, 0.0),
    ));
    assert_eq!(scene.node_count(), 1);
    assert!(scene.contains(id));

    assert!(scene.remove_from_scene(id));
    assert_eq!(scene.node_count(), 0);

    // double removal is a no-op
    assert!(!scene.remove_from_scene(id));
}

#[test]
fn transform_moves_the_model_matrix() {
    let mut scene = SceneHost::new();

    let id = scene.add_to_scene(MeshNode::new(
        "Test",
        MeshData::uv_sphere(1.0, 8, 6),
        Vector3::new(1.0, 1.0, 1.0),
    ));

    let position = Vector3::new(3.0, -2.0, 5.0);
    scene
        .node_mut(id)
        .unwrap()
        .transform
        .set_position_vec(position);

    let node = scene.node(id).unwrap();
    let origin = node.transform.full_matrix().transform_point(&Point3::origin());
    assert!((origin.coords - position).norm() < 1e-6);
}

#[test]
fn camera_resize_updates_the_aspect_ratio() {
    let mut camera = Camera::new();
    camera.resize(1600.0, 800.0);
    assert!((camera.projection.aspect() - 2.0).abs() < 1e-6);
}

#[test]
fn screen_ray_through_the_center_points_at_the_target() {
    let mut camera = Camera::new();
    camera.resize(800.0, 600.0);

    let eye = Vector3::new(0.0, 10.0, 20.0);
    let target = Vector3::new(0.0, 0.0, 0.0);
    camera.look_at(eye, target);

    let (origin, direction) = camera
        .screen_ray(Vector2::new(400.0, 300.0), 800.0, 600.0)
        .expect("center ray should exist");

    let expected = (target - eye).normalize();
    assert!(direction.dot(&expected) > 0.999, "direction was {direction:?}");
    assert!((origin.coords - eye).norm() < 0.1);
}

#[test]
fn plane_faces_straight_up() {
    let mesh = MeshData::plane(10.0);
    assert!(mesh.vertices.iter().all(|v| v.normal == Vector3::y()));
    assert!(mesh.vertices.iter().all(|v| v.position.y == 0.0));
}

#[test]
fn generated_normals_are_unit_length() {
    let meshes = [
        MeshData::cuboid(Vector3::new(2.0, 2.0, 2.0)),
        MeshData::uv_sphere(1.0, 16, 12),
        MeshData::cylinder(1.0, 2.0, 8),
        MeshData::cone(1.0, 2.0, 8),
        MeshData::torus(1.0, 0.5, 8, 16),
    ];

    for mesh in meshes {
        assert!(!mesh.vertices.is_empty());
        assert_eq!(mesh.index_count() % 3, 0);
        for vertex in &mesh.vertices {
            assert!((vertex.normal.norm() - 1.0).abs() < 1e-4);
        }
        for index in &mesh.indices {
            assert!((*index as usize) < mesh.vertex_count());
        }
    }
}

#[test]
fn cylinder_honors_the_segment_count() {
    let segments = 8;
    let mesh = MeshData::cylinder(1.0, 2.0, segments);

    // side ring + two caps with center vertices
    let expected_vertices = (segments as usize + 1) * 2 + 2 * (segments as usize + 2);
    let expected_indices = segments as usize * 6 + 2 * segments as usize * 3;
    assert_eq!(mesh.vertex_count(), expected_vertices);
    assert_eq!(mesh.index_count(), expected_indices);
}

#[test]
fn sphere_vertices_sit_on_the_radius() {
    let mesh = MeshData::uv_sphere(1.5, 16, 12);
    for vertex in &mesh.vertices {
        assert!((vertex.position.norm() - 1.5).abs() < 1e-4);
    }
}
