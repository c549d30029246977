//! Field parameters for runtime tuning

use particle_physics::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,

    // Pointer interaction
    pub interaction_radius: f32,
    pub repulsion_strength: f32,
    pub proximity_hue_shift: f32,
    pub proximity_scale_gain: f32,
    pub proximity_opacity_base: f32,
    pub proximity_opacity_gain: f32,

    // Relaxation
    pub scale_decay: f32,
    pub scale_floor: f32,
    pub opacity_decay: f32,
    pub opacity_floor: f32,
    pub velocity_damping: f32,

    // Palette
    pub global_hue_step: f32,
    pub ambient_hue_step: f32,
    pub saturation: f32,
    pub lightness: f32,

    // Glow
    pub glow_scale_threshold: f32,
    pub glow_opacity: f32,
    pub glow_blur: f32,

    // Links
    pub link_threshold: f32,
    pub link_max_opacity: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,

            interaction_radius: INTERACTION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            proximity_hue_shift: PROXIMITY_HUE_SHIFT,
            proximity_scale_gain: PROXIMITY_SCALE_GAIN,
            proximity_opacity_base: PROXIMITY_OPACITY_BASE,
            proximity_opacity_gain: PROXIMITY_OPACITY_GAIN,

            scale_decay: SCALE_DECAY,
            scale_floor: SCALE_FLOOR,
            opacity_decay: OPACITY_DECAY,
            opacity_floor: OPACITY_FLOOR,
            velocity_damping: VELOCITY_DAMPING,

            global_hue_step: GLOBAL_HUE_STEP,
            ambient_hue_step: AMBIENT_HUE_STEP,
            saturation: SATURATION,
            lightness: LIGHTNESS,

            glow_scale_threshold: GLOW_SCALE_THRESHOLD,
            glow_opacity: GLOW_OPACITY,
            glow_blur: GLOW_BLUR,

            link_threshold: LINK_THRESHOLD,
            link_max_opacity: LINK_MAX_OPACITY,
        }
    }
}

impl FieldParams {
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }
}
