//! # Particle Field Model
//!
//! Particle records, field constants, color conversion and the cursor
//! follower shared by the simulation and the renderer.

pub mod color;
pub mod constants;
pub mod follower;
pub mod particle;

pub use color::*;
pub use constants::*;
pub use follower::*;
pub use particle::*;
