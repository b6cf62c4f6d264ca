//! Physics simulation powered by `rapier`.
//!
//! The [`PhysicsSimulator`] struct manages rigid bodies, steps the world at
//! a fixed timestep and exposes the global simulation parameters.

pub mod simulator;

pub use simulator::*;
