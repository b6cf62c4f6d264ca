pub mod checks;
pub mod color;
pub mod frame_counter;
pub mod sizes;

pub use color::*;
