use crate::sandbox::Sandbox;
use crate::{AppRuntime, AppSettings};
use std::error::Error;
use winit::dpi::{PhysicalSize, Size};
use winit::window::{Window, WindowAttributes};

#[allow(unused)]
pub trait AppState: Sized {
    fn init(&mut self, sandbox: &mut Sandbox, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
    fn update(&mut self, sandbox: &mut Sandbox, window: &Window) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
    fn destroy(&mut self, sandbox: &mut Sandbox) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

impl<S: AppState> AppRuntime for S {
    fn configure(self, title: &str, width: u32, height: u32) -> AppSettings<Self> {
        AppSettings {
            window: WindowAttributes::default()
                .with_inner_size(Size::Physical(PhysicalSize { width, height }))
                .with_title(title),
            state: self,
        }
    }

    fn default_config(self) -> AppSettings<Self> {
        AppSettings {
            window: WindowAttributes::default()
                .with_inner_size(Size::Physical(PhysicalSize {
                    width: 800,
                    height: 600,
                }))
                .with_title("Tumblebox Window"),
            state: self,
        }
    }
}
