//! Per-frame display list handed from the simulation to the renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use particle_physics::constants::{FOLLOWER_RADIUS, FOLLOWER_RING};
use particle_physics::{CursorFollower, Hsla};

/// Follower face, Catppuccin Mocha mauve
const FOLLOWER_FACE: Hsla = Hsla {
    h: 267.0,
    s: 0.84,
    l: 0.81,
    a: 0.9,
};
/// Follower eyes, Catppuccin Mocha base
const FOLLOWER_EYES: Hsla = Hsla {
    h: 240.0,
    s: 0.21,
    l: 0.15,
    a: 1.0,
};
const EYE_OFFSET: Vec2 = Vec2::new(6.0, -4.0);
const EYE_RADIUS: f32 = 2.5;

/// Filled disc in surface pixels
///
/// `softness` is the width of the alpha falloff band at the rim: 0 for a
/// crisp particle, the blur width for a glow.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub softness: f32,
    /// Linear RGBA
    pub color: [f32; 4],
}

/// One endpoint of a link line
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub _padding: [f32; 2],
    /// Linear RGBA
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(position: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            _padding: [0.0; 2],
            color,
        }
    }
}

/// Everything drawn in one frame. Links go beneath circles; circles are
/// drawn in emission order.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub circles: Vec<CircleInstance>,
    /// Consecutive pairs form one line
    pub links: Vec<LineVertex>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame, keeping allocations
    pub fn clear(&mut self) {
        self.circles.clear();
        self.links.clear();
    }

    pub fn push_circle(&mut self, center: Vec2, radius: f32, softness: f32, color: [f32; 4]) {
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            softness,
            color,
        });
    }

    pub fn push_link(&mut self, from: Vec2, to: Vec2, color: [f32; 4]) {
        self.links.push(LineVertex::new(from, color));
        self.links.push(LineVertex::new(to, color));
    }

    /// Draw the cursor follower on top of everything emitted so far.
    /// Nothing is drawn while it is hidden.
    pub fn push_follower(&mut self, follower: &CursorFollower) {
        if !follower.is_visible() {
            return;
        }

        let center = follower.position();
        let face = FOLLOWER_FACE.to_linear_rgba();
        let ring = FOLLOWER_FACE.with_alpha(0.35).to_linear_rgba();
        let eyes = FOLLOWER_EYES.to_linear_rgba();

        self.push_circle(center, FOLLOWER_RADIUS + FOLLOWER_RING, FOLLOWER_RING, ring);
        self.push_circle(center, FOLLOWER_RADIUS, 0.0, face);

        // Eyes lean with the follower's tilt
        let lean = Vec2::from_angle(follower.tilt_degrees().to_radians());
        for side in [-1.0, 1.0] {
            let offset = Vec2::new(EYE_OFFSET.x * side, EYE_OFFSET.y);
            self.push_circle(center + lean.rotate(offset), EYE_RADIUS, 0.0, eyes);
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.links.is_empty()
    }
}
