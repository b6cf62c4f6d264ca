use nalgebra::Vector3;
use rapier3d::prelude::{Ray, QueryFilter, SharedShape};
use tumblebox::physics::{
    DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_RESTITUTION, FIXED_TIMESTEP, PhysicsSimulator,
};

#[test]
fn defaults_match_the_documented_values() {
    let physics = PhysicsSimulator::default();

    assert_eq!(physics.gravity, Vector3::new(0.0, -DEFAULT_GRAVITY, 0.0));
    assert_eq!(physics.restitution(), DEFAULT_RESTITUTION);
    assert_eq!(physics.friction(), DEFAULT_FRICTION);
    assert!(!physics.is_paused());
    assert_eq!(physics.time_scale(), 1.0);
}

#[test]
fn material_setters_clamp_and_retrofit_existing_colliders() {
    let mut physics = PhysicsSimulator::default();

    let handle = physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 5.0, 0.0));

    physics.set_material_properties(-0.5, 1.2);
    assert_eq!(physics.restitution(), 0.0);
    assert_eq!(physics.friction(), 1.2);

    let collider = physics.collider_set.get(handle.collider).unwrap();
    assert_eq!(collider.restitution(), 0.0);
    assert_eq!(collider.friction(), 1.2);
}

#[test]
fn clear_dynamic_bodies_spares_fixed_ones() {
    let mut physics = PhysicsSimulator::default();

    let ground = physics.create_static_body(
        SharedShape::cuboid(10.0, 0.1, 10.0),
        Vector3::new(0.0, -0.1, 0.0),
    );
    physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 5.0, 0.0));
    physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(2.0, 5.0, 0.0));
    assert_eq!(physics.dynamic_body_count(), 2);

    physics.clear_dynamic_bodies();

    assert_eq!(physics.dynamic_body_count(), 0);
    assert!(physics.body_transform(ground).is_some());
}

#[test]
fn time_scale_zero_freezes_motion() {
    let mut physics = PhysicsSimulator::default();

    let handle = physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 10.0, 0.0));
    physics.set_time_scale(0.0);

    for _ in 0..10 {
        physics.step(FIXED_TIMESTEP, FIXED_TIMESTEP, 3);
    }

    let (position, _) = physics.body_transform(handle).unwrap();
    assert_eq!(position, Vector3::new(0.0, 10.0, 0.0));
}

#[test]
fn a_single_step_is_bounded_by_max_substeps() {
    let mut physics = PhysicsSimulator::default();

    let handle = physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 10.0, 0.0));

    // one call with an absurd real delta may only advance a few fixed
    // steps, so the drop stays tiny instead of teleporting the body
    physics.step(FIXED_TIMESTEP, 100.0, 3);

    let (position, _) = physics.body_transform(handle).unwrap();
    assert!(position.y > 9.9, "body fell too far: y = {}", position.y);
}

#[test]
fn paused_stepping_is_a_no_op() {
    let mut physics = PhysicsSimulator::default();

    let handle = physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 10.0, 0.0));
    physics.set_paused(true);

    for _ in 0..20 {
        physics.step(FIXED_TIMESTEP, FIXED_TIMESTEP, 3);
    }

    let (position, _) = physics.body_transform(handle).unwrap();
    assert_eq!(position, Vector3::new(0.0, 10.0, 0.0));

    physics.set_paused(false);
    for _ in 0..20 {
        physics.step(FIXED_TIMESTEP, FIXED_TIMESTEP, 3);
    }
    let (position, _) = physics.body_transform(handle).unwrap();
    assert!(position.y < 10.0);
}

#[test]
fn cast_ray_finds_the_ground() {
    let mut physics = PhysicsSimulator::default();

    let ground = physics.create_static_body(
        SharedShape::cuboid(10.0, 0.1, 10.0),
        Vector3::new(0.0, -0.1, 0.0),
    );

    // the query pipeline picks up new colliders on the next step
    physics.step(FIXED_TIMESTEP, FIXED_TIMESTEP, 1);

    let ray = Ray::new(
        nalgebra::Point3::new(0.0, 5.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
    );
    let (toi, collider) = physics
        .cast_ray(&ray, 100.0, true, QueryFilter::default())
        .expect("ray should hit the ground");

    assert_eq!(collider, ground.collider);
    assert!((ray.point_at(toi).y - 0.0).abs() < 1e-3);
}

#[test]
fn body_tags_survive_the_round_trip() {
    let mut physics = PhysicsSimulator::default();

    let handle = physics.create_body(SharedShape::ball(0.5), 1.0, Vector3::new(0.0, 5.0, 0.0));
    physics.set_body_tag(handle, 42);

    assert_eq!(physics.body_tag(handle.collider), Some(42));
}
