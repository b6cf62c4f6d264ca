//! The sandbox driver: spawns solids where you click, with a handful of
//! keys to steer the world parameters.
//!
//! Controls:
//! - `1`..`5` select the active shape (Box, Sphere, Cylinder, Cone, Torus)
//! - left click drops the active shape above the clicked point
//! - `Space` drops one at a random spot
//! - `Up`/`Down` gravity, `T`/`G` restitution, `Y`/`H` friction
//! - `P` pause, `C` clear, `R` reset to defaults, `Esc` quit

use futures::executor::block_on;
use log::{debug, info};
use nalgebra::{Vector2, Vector3};
use rapier3d::prelude::{QueryFilter, Ray};
use std::error::Error;
use std::time::Instant;
use tumblebox::registry::{ObjectId, ShapeKind};
use tumblebox::sandbox::Sandbox;
use tumblebox::scene::{MeshData, MeshNode, PointLightUniform};
use tumblebox::utils::frame_counter::FrameCounter;
use tumblebox::{AppRuntime, AppState};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;
use winit::window::Window;

const GROUND_HALF_EXTENT: f32 = 20.0;
const GROUND_THICKNESS: f32 = 0.1;
const MAX_PICK_DISTANCE: f32 = 300.0;

const GRAVITY_STEP: f32 = 1.0;
const GRAVITY_MAX: f32 = 30.0;
const MATERIAL_STEP: f32 = 0.05;

const SHAPE_KEYS: [(KeyCode, ShapeKind); 5] = [
    (KeyCode::Digit1, ShapeKind::Box),
    (KeyCode::Digit2, ShapeKind::Sphere),
    (KeyCode::Digit3, ShapeKind::Cylinder),
    (KeyCode::Digit4, ShapeKind::Cone),
    (KeyCode::Digit5, ShapeKind::Torus),
];

struct SandboxApp {
    active_kind: ShapeKind,
    frame_counter: FrameCounter,
    last_frame: Instant,
}

impl Default for SandboxApp {
    fn default() -> Self {
        SandboxApp {
            active_kind: ShapeKind::Box,
            frame_counter: FrameCounter::default(),
            last_frame: Instant::now(),
        }
    }
}

impl AppState for SandboxApp {
    fn init(&mut self, sandbox: &mut Sandbox, window: &Window) -> Result<(), Box<dyn Error>> {
        let size = window.inner_size();
        sandbox
            .scene
            .camera
            .resize(size.width as f32, size.height as f32);
        sandbox
            .scene
            .camera
            .look_at(Vector3::new(0.0, 14.0, 28.0), Vector3::new(0.0, 2.0, 0.0));

        sandbox.scene.add_to_scene(MeshNode::new(
            "Ground",
            MeshData::plane(GROUND_HALF_EXTENT),
            Vector3::new(0.22, 0.24, 0.22),
        ));
        // collider top sits exactly at y = 0 where the plane is drawn
        sandbox.physics.create_static_body(
            rapier3d::prelude::SharedShape::cuboid(
                GROUND_HALF_EXTENT,
                GROUND_THICKNESS,
                GROUND_HALF_EXTENT,
            ),
            Vector3::new(0.0, -GROUND_THICKNESS, 0.0),
        );

        sandbox.scene.add_point_light(PointLightUniform::new(
            Vector3::new(12.0, 18.0, 8.0),
            Vector3::new(1.0, 1.0, 1.0),
            80.0,
            1.0,
        ));
        sandbox.scene.add_point_light(PointLightUniform::new(
            Vector3::new(-10.0, 12.0, -6.0),
            Vector3::new(1.0, 0.85, 0.7),
            60.0,
            0.6,
        ));

        // one of each so the scene isn't empty on startup
        for kind in ShapeKind::ALL {
            sandbox.spawn_random_above(kind);
        }

        info!("Sandbox ready with {} solids", sandbox.registry.count());
        Ok(())
    }

    fn update(&mut self, sandbox: &mut Sandbox, window: &Window) -> Result<(), Box<dyn Error>> {
        self.frame_counter
            .new_frame(self.last_frame.elapsed().as_secs_f32());
        self.last_frame = Instant::now();

        if sandbox.input.is_key_down(KeyCode::Escape) {
            sandbox.shutdown();
            return Ok(());
        }

        for (key, kind) in SHAPE_KEYS {
            if sandbox.input.is_key_down(key) {
                self.active_kind = kind;
            }
        }

        if sandbox.input.is_key_down(KeyCode::Space) {
            sandbox.spawn_random_above(self.active_kind);
        }

        if sandbox.input.is_button_down(MouseButton::Left) {
            self.spawn_at_cursor(sandbox, window);
        }

        self.handle_parameter_keys(sandbox);

        window.set_title(&self.format_title(sandbox));

        Ok(())
    }
}

impl SandboxApp {
    fn handle_parameter_keys(&mut self, sandbox: &mut Sandbox) {
        let input = &sandbox.input;

        let mut gravity = -sandbox.physics.gravity.y;
        let mut restitution = sandbox.physics.restitution();
        let mut friction = sandbox.physics.friction();

        let gravity_up = input.is_key_down(KeyCode::ArrowUp);
        let gravity_down = input.is_key_down(KeyCode::ArrowDown);
        let restitution_up = input.is_key_down(KeyCode::KeyT);
        let restitution_down = input.is_key_down(KeyCode::KeyG);
        let friction_up = input.is_key_down(KeyCode::KeyY);
        let friction_down = input.is_key_down(KeyCode::KeyH);
        let pause = input.is_key_down(KeyCode::KeyP);
        let clear = input.is_key_down(KeyCode::KeyC);
        let reset = input.is_key_down(KeyCode::KeyR);

        if gravity_up || gravity_down {
            gravity += if gravity_up { GRAVITY_STEP } else { -GRAVITY_STEP };
            gravity = gravity.clamp(0.0, GRAVITY_MAX);
            sandbox.physics.set_gravity(0.0, -gravity, 0.0);
            info!("Gravity magnitude set to {gravity:.1}");
        }

        if restitution_up || restitution_down || friction_up || friction_down {
            if restitution_up {
                restitution += MATERIAL_STEP;
            } else if restitution_down {
                restitution -= MATERIAL_STEP;
            }
            if friction_up {
                friction += MATERIAL_STEP;
            } else if friction_down {
                friction -= MATERIAL_STEP;
            }
            restitution = restitution.clamp(0.0, 1.0);
            friction = friction.clamp(0.0, 1.5);
            sandbox.physics.set_material_properties(restitution, friction);
            info!("Material set to bounce {restitution:.2}, friction {friction:.2}");
        }

        if pause {
            let paused = !sandbox.physics.is_paused();
            sandbox.physics.set_paused(paused);
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }

        if clear {
            sandbox.clear();
        }

        if reset {
            sandbox.reset();
            info!("Sandbox reset to defaults");
        }
    }

    /// Casts a ray through the cursor and drops the active shape a bit
    /// above whatever it hit.
    fn spawn_at_cursor(&self, sandbox: &mut Sandbox, window: &Window) -> Option<ObjectId> {
        let cursor = *sandbox.input.get_mouse_pos();
        let size = window.inner_size();

        let (origin, direction) = sandbox.scene.camera.screen_ray(
            Vector2::new(cursor.x, cursor.y),
            size.width as f32,
            size.height as f32,
        )?;

        let ray = Ray::new(origin, direction);
        let (toi, collider) =
            sandbox
                .physics
                .cast_ray(&ray, MAX_PICK_DISTANCE, true, QueryFilter::default())?;
        let anchor = ray.point_at(toi);

        if let Some(hit) = sandbox
            .physics
            .body_tag(collider)
            .and_then(|tag| sandbox.registry.get_by_tag(tag))
        {
            debug!("Click landed on {} #{}", hit.kind, hit.id.0);
        }

        sandbox.spawn_above_anchor(self.active_kind, anchor.coords)
    }

    fn format_title(&self, sandbox: &Sandbox) -> String {
        let paused = if sandbox.physics.is_paused() {
            " [PAUSED]"
        } else {
            ""
        };

        format!(
            "Tumblebox [{}] | objects: {} | gravity: {:.1} | bounce: {:.2} | friction: {:.2} | FPS: [ {} ]{}",
            self.active_kind,
            sandbox.registry.count(),
            -sandbox.physics.gravity.y,
            sandbox.physics.restitution(),
            sandbox.physics.friction(),
            self.frame_counter.fps(),
            paused,
        )
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let app = SandboxApp::default().configure("Tumblebox", 1280, 720);
    block_on(app.run())
}
