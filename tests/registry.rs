use nalgebra::{UnitQuaternion, Vector3};
use std::time::Duration;
use tumblebox::physics::FIXED_TIMESTEP;
use tumblebox::registry::{ObjectId, SPAWN_CLEARANCE, ShapeKind};
use tumblebox::sandbox::Sandbox;

fn spawn_box(sandbox: &mut Sandbox, y: f32) -> ObjectId {
    sandbox
        .spawn(ShapeKind::Box, Vector3::new(0.0, y, 0.0), 2.0)
        .expect("spawn should succeed")
}

#[test]
fn spawn_tracks_one_object_per_kind() {
    let mut sandbox = Sandbox::new();

    for (i, kind) in ShapeKind::ALL.into_iter().enumerate() {
        let id = sandbox
            .spawn(kind, Vector3::new(0.0, 10.0, 0.0), 2.0)
            .expect("spawn should succeed");
        assert_eq!(sandbox.registry.count(), i + 1);

        let object = sandbox.registry.get(id).expect("object should be tracked");
        assert_eq!(object.kind, kind);
        assert!(sandbox.scene.contains(object.node));
        assert!(sandbox.physics.body_transform(object.body).is_some());
    }

    assert_eq!(sandbox.scene.node_count(), 5);
    assert_eq!(sandbox.physics.dynamic_body_count(), 5);
}

#[test]
fn ids_strictly_increase_and_are_never_reused() {
    let mut sandbox = Sandbox::new();

    let first = spawn_box(&mut sandbox, 10.0);
    let second = spawn_box(&mut sandbox, 12.0);
    assert!(second > first);

    sandbox.remove(second);
    let third = spawn_box(&mut sandbox, 14.0);
    assert!(third > second);
}

#[test]
fn degenerate_spawns_are_rejected() {
    let mut sandbox = Sandbox::new();

    let position = Vector3::new(0.0, 10.0, 0.0);
    assert!(sandbox.spawn(ShapeKind::Sphere, position, 0.0).is_none());
    assert!(sandbox.spawn(ShapeKind::Sphere, position, -1.0).is_none());
    assert!(sandbox.spawn(ShapeKind::Sphere, position, f32::NAN).is_none());
    assert!(
        sandbox
            .spawn(ShapeKind::Sphere, Vector3::new(f32::NAN, 0.0, 0.0), 2.0)
            .is_none()
    );

    assert_eq!(sandbox.registry.count(), 0);
    assert_eq!(sandbox.scene.node_count(), 0);
    assert_eq!(sandbox.physics.dynamic_body_count(), 0);
}

#[test]
fn remove_is_idempotent() {
    let mut sandbox = Sandbox::new();

    let id = spawn_box(&mut sandbox, 10.0);
    let node = sandbox.registry.get(id).unwrap().node;
    let body = sandbox.registry.get(id).unwrap().body;
    assert_eq!(sandbox.registry.count(), 1);

    assert!(sandbox.remove(id));
    assert_eq!(sandbox.registry.count(), 0);
    assert!(!sandbox.scene.contains(node));
    assert!(sandbox.physics.body_transform(body).is_none());

    // second removal of the same reference is a benign no-op
    assert!(!sandbox.remove(id));
    assert_eq!(sandbox.registry.count(), 0);
}

#[test]
fn clear_all_sweeps_tracked_objects_and_strays() {
    let mut sandbox = Sandbox::new();

    let ground = sandbox.physics.create_static_body(
        rapier3d::prelude::SharedShape::cuboid(20.0, 0.1, 20.0),
        Vector3::new(0.0, -0.1, 0.0),
    );

    for kind in ShapeKind::ALL {
        sandbox.spawn(kind, Vector3::new(0.0, 10.0, 0.0), 2.0);
    }
    assert_eq!(sandbox.registry.count(), 5);

    // a body that slipped out of tracking must not survive the clear
    sandbox.physics.create_body(
        rapier3d::prelude::SharedShape::ball(0.5),
        1.0,
        Vector3::new(0.0, 20.0, 0.0),
    );
    assert_eq!(sandbox.physics.dynamic_body_count(), 6);

    sandbox.clear();

    assert_eq!(sandbox.registry.count(), 0);
    assert_eq!(sandbox.scene.node_count(), 0);
    assert_eq!(sandbox.physics.dynamic_body_count(), 0);
    // static scenery stays
    assert!(sandbox.physics.body_transform(ground).is_some());
}

#[test]
fn sync_copies_body_transform_exactly() {
    let mut sandbox = Sandbox::new();

    let id = spawn_box(&mut sandbox, 10.0);
    let body = sandbox.registry.get(id).unwrap().body;
    let node = sandbox.registry.get(id).unwrap().node;

    let position = Vector3::new(0.0, 8.0, 0.0);
    let rotation = UnitQuaternion::from_euler_angles(0.3, 0.5, -0.2);
    {
        let rb = sandbox.physics.rigid_body_set.get_mut(body.body).unwrap();
        rb.set_translation(position, true);
        rb.set_rotation(rotation, true);
    }

    sandbox
        .registry
        .sync_all(&sandbox.physics, &mut sandbox.scene);

    let transform = &sandbox.scene.node(node).unwrap().transform;
    // a direct copy, so exact equality is expected
    assert_eq!(transform.position(), position);
    assert_eq!(transform.rotation(), rotation);
}

#[test]
fn spawn_above_anchor_applies_clearance() {
    let mut sandbox = Sandbox::new();

    let anchor = Vector3::new(1.0, 0.0, 2.0);
    let id = sandbox
        .spawn_above_anchor(ShapeKind::Cone, anchor)
        .expect("spawn should succeed");

    let body = sandbox.registry.get(id).unwrap().body;
    let (position, _) = sandbox.physics.body_transform(body).unwrap();
    assert_eq!(position, Vector3::new(1.0, SPAWN_CLEARANCE, 2.0));
}

#[test]
fn spawn_random_above_stays_in_bounds() {
    let mut sandbox = Sandbox::new();

    for _ in 0..50 {
        let id = sandbox
            .spawn_random_above(ShapeKind::Sphere)
            .expect("spawn should succeed");
        let body = sandbox.registry.get(id).unwrap().body;
        let (position, _) = sandbox.physics.body_transform(body).unwrap();

        assert!(position.x.abs() <= 8.0);
        assert!(position.z.abs() <= 8.0);
        assert!((6.0..14.0).contains(&position.y));
    }
}

#[test]
fn gravity_pulls_bodies_down_and_sync_follows() {
    let mut sandbox = Sandbox::new();

    let id = spawn_box(&mut sandbox, 10.0);
    let body = sandbox.registry.get(id).unwrap().body;
    let node = sandbox.registry.get(id).unwrap().node;

    for _ in 0..30 {
        sandbox.advance(Duration::from_secs_f32(FIXED_TIMESTEP));
    }

    let (position, _) = sandbox.physics.body_transform(body).unwrap();
    assert!(position.y < 10.0, "body should have fallen, y = {}", position.y);

    let visual = sandbox.scene.node(node).unwrap().transform.position();
    assert_eq!(visual, position);
}

#[test]
fn paused_simulation_keeps_bodies_still() {
    let mut sandbox = Sandbox::new();

    let id = spawn_box(&mut sandbox, 10.0);
    let body = sandbox.registry.get(id).unwrap().body;

    sandbox.physics.set_paused(true);
    for _ in 0..10 {
        sandbox.advance(Duration::from_secs_f32(FIXED_TIMESTEP));
    }

    let (position, _) = sandbox.physics.body_transform(body).unwrap();
    assert_eq!(position, Vector3::new(0.0, 10.0, 0.0));
}
