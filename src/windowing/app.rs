use crate::AppState;
use crate::rendering::Renderer;
use crate::sandbox::Sandbox;
use crate::windowing::FrameScheduler;
use futures::executor::block_on;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

pub struct App<S: AppState> {
    renderer: Option<Renderer>,
    sandbox: Sandbox,
    window_attributes: WindowAttributes,
    scheduler: FrameScheduler,
    state: S,
}

pub struct AppSettings<S: AppState> {
    pub window: WindowAttributes,
    pub state: S,
}

pub trait AppRuntime: AppState {
    fn configure(self, title: &str, width: u32, height: u32) -> AppSettings<Self>;

    fn default_config(self) -> AppSettings<Self>;
}

impl<S: AppState> AppSettings<S> {
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        let (event_loop, mut app) = self.init_state()?;
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    fn init_state(self) -> Result<(EventLoop<()>, App<S>), Box<dyn Error>> {
        let event_loop = match EventLoop::new() {
            Err(EventLoopError::NotSupported(_)) => {
                return Err("No graphics backend found that could be used.".into());
            }
            e => e?,
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        let app = App {
            renderer: None,
            sandbox: Sandbox::new(),
            window_attributes: self.window,
            scheduler: FrameScheduler::new(),
            state: self.state,
        };

        Ok((event_loop, app))
    }
}

impl<S: AppState> App<S> {
    pub fn renderer(&self) -> &Renderer {
        self.renderer.as_ref().expect("Renderer not initialized yet")
    }
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        info!("(Re)initializing render state!");
        let window = match event_loop.create_window(self.window_attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Error when creating window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match block_on(Renderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                error!("Error when creating renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.state.init(&mut self.sandbox, renderer.window()) {
            error!("Sandbox init hook returned: {e}");
            event_loop.exit();
            return;
        }

        self.renderer = Some(renderer);
        self.scheduler.start();
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if event_loop.exiting() {
            return;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            error!("No renderer.");
            return;
        };
        let sandbox = &mut self.sandbox;
        if sandbox.is_shutting_down() {
            event_loop.exit();
            return;
        }

        if window_id != renderer.window().id() {
            return;
        }

        sandbox.input.process_event(&event);

        match event {
            WindowEvent::RedrawRequested => {
                // a suspended scheduler produces no delta and re-arms
                // nothing; the next start() kicks the loop again
                let Some(delta) = self.scheduler.begin_frame() else {
                    return;
                };

                if let Err(e) = self.state.update(sandbox, renderer.window()) {
                    error!("Error happened when calling update function hook: {e}");
                }

                // step fully, then sync, then draw; the picture must
                // never run ahead of or behind the simulation
                sandbox.advance(delta);
                sandbox.next_frame();

                if !renderer.render_scene(&mut sandbox.scene) {
                    event_loop.exit();
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Occluded(occluded) => {
                if occluded {
                    self.scheduler.stop();
                } else {
                    self.scheduler.start();
                    renderer.window().request_redraw();
                }
            }
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                sandbox
                    .scene
                    .camera
                    .resize(size.width as f32, size.height as f32);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Err(e) = self.state.destroy(&mut self.sandbox) {
            error!("Error happened when calling destroy function hook: {e}");
        }
        self.sandbox.clear();
    }
}
