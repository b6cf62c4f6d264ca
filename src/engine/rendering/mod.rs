//! GPU rendering backend built on top of `wgpu`.
//!
//! The rendering module turns the [`SceneHost`](crate::scene::SceneHost)
//! into pixels: it owns the device state, uploads node meshes lazily the
//! first time they are seen and draws the scene once per frame.

pub mod error;
pub mod renderer;
pub mod state;

pub use renderer::*;
pub use state::*;
