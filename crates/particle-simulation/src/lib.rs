//! # Particle Field Simulation
//!
//! CPU simulation of the pointer-reactive particle field. Each frame
//! advances every particle and rebuilds a [`Scene`] display list for the
//! renderer.

pub mod params;
pub mod scene;
pub mod simulation;

pub use params::*;
pub use scene::*;
pub use simulation::*;
