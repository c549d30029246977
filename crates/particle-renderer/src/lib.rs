//! # Particle Renderer
//!
//! Draws a [`particle_simulation::Scene`] onto a wgpu surface.

pub mod renderer;
pub mod viewport;

pub use renderer::*;
pub use viewport::*;
