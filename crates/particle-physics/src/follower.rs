//! Eased marker that trails the pointer

use crate::constants::{FOLLOWER_EASING, FOLLOWER_TILT};
use glam::Vec2;

/// Trails the pointer, covering a fixed fraction of the remaining offset each frame.
///
/// Hidden until the first pointer event and again whenever the pointer
/// leaves the surface.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    current: Vec2,
    target: Vec2,
    easing: f32,
    visible: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        Self::with_easing(FOLLOWER_EASING)
    }

    pub fn with_easing(easing: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            easing: easing.clamp(0.0, 1.0),
            visible: false,
        }
    }

    /// Record the latest pointer position and show the follower
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Advance one frame toward the target
    pub fn step(&mut self) {
        self.current += (self.target - self.current) * self.easing;
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Lean in degrees, proportional to the horizontal lag behind the pointer
    pub fn tilt_degrees(&self) -> f32 {
        (self.target.x - self.current.x) * FOLLOWER_TILT
    }
}
