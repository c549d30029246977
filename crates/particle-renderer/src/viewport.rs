//! Pixel-space viewport for 2D drawing

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Viewport uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewportUniform {
    /// Surface size in logical pixels
    pub size: [f32; 2],
    pub _padding: [f32; 2],
}

/// Maps logical pixels (origin top-left, y down) to clip space.
///
/// The surface is configured in physical pixels; everything drawn on it is
/// laid out in logical pixels, `scale_factor` physical pixels each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    /// Viewport over a `width` x `height` physical surface
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            width: width.max(1) as f32 / scale_factor,
            height: height.max(1) as f32 / scale_factor,
            scale_factor,
        }
    }

    /// New physical surface size at the current scale factor
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height, self.scale_factor);
    }

    /// Keep the physical size, change how many physical pixels make a logical one
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        let physical = self.size() * self.scale_factor;
        *self = Self::new(
            physical.x.round() as u32,
            physical.y.round() as u32,
            scale_factor,
        );
    }

    /// Logical surface size
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn to_logical(&self, physical: Vec2) -> Vec2 {
        physical / self.scale_factor
    }

    /// CPU mirror of the shader's `to_clip`
    pub fn to_clip(&self, pixel: Vec2) -> Vec2 {
        let ndc = pixel / Vec2::new(self.width, self.height) * 2.0 - Vec2::ONE;
        Vec2::new(ndc.x, -ndc.y)
    }

    pub fn to_uniform(&self) -> ViewportUniform {
        ViewportUniform {
            size: [self.width, self.height],
            _padding: [0.0; 2],
        }
    }
}
