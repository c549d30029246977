//! Field constants
//!
//! Distances are in surface pixels, rates are per displayed frame.

/// Number of particles seeded into the field
pub const PARTICLE_COUNT: usize = 150;

/// Pointer distance below which particles react
pub const INTERACTION_RADIUS: f32 = 150.0;

/// Peak velocity impulse applied by the pointer (at zero distance)
pub const REPULSION_STRENGTH: f32 = 0.5;

/// Hue offset in degrees reached at full proximity
pub const PROXIMITY_HUE_SHIFT: f32 = 180.0;

/// Extra scale reached at full proximity
pub const PROXIMITY_SCALE_GAIN: f32 = 2.0;

/// Opacity of a particle at the edge of the interaction radius
pub const PROXIMITY_OPACITY_BASE: f32 = 0.8;

/// Extra opacity reached at full proximity
pub const PROXIMITY_OPACITY_GAIN: f32 = 0.2;

/// Multiplicative scale relaxation outside the interaction radius
pub const SCALE_DECAY: f32 = 0.95;

/// Resting scale
pub const SCALE_FLOOR: f32 = 1.0;

/// Multiplicative opacity relaxation outside the interaction radius
pub const OPACITY_DECAY: f32 = 0.98;

/// Resting opacity
pub const OPACITY_FLOOR: f32 = 0.3;

/// Global palette hue advance per frame (degrees)
pub const GLOBAL_HUE_STEP: f32 = 0.5;

/// Ambient hue drift of a resting particle per frame (degrees)
pub const AMBIENT_HUE_STEP: f32 = 0.5;

/// Velocity multiplier applied every frame
pub const VELOCITY_DAMPING: f32 = 0.99;

/// HSL saturation of every particle and link
pub const SATURATION: f32 = 0.8;

/// HSL lightness of every particle and link
pub const LIGHTNESS: f32 = 0.6;

/// Scale above which a glow is drawn beneath the particle
pub const GLOW_SCALE_THRESHOLD: f32 = 1.2;

/// Glow opacity relative to the particle
pub const GLOW_OPACITY: f32 = 0.5;

/// Width of the glow falloff band in pixels
pub const GLOW_BLUR: f32 = 20.0;

/// Particle distance below which a link is drawn
pub const LINK_THRESHOLD: f32 = 120.0;

/// Link opacity for two coincident particles
pub const LINK_MAX_OPACITY: f32 = 0.15;

// Seeding ranges
/// Largest initial speed per axis
pub const SEED_MAX_SPEED: f32 = 0.25;
pub const SEED_MIN_SIZE: f32 = 1.0;
pub const SEED_MAX_SIZE: f32 = 4.0;
pub const SEED_MIN_OPACITY: f32 = 0.3;
pub const SEED_MAX_OPACITY: f32 = 0.8;

/// Fraction of the remaining offset the cursor follower covers per frame
pub const FOLLOWER_EASING: f32 = 0.1;

/// Follower tilt in degrees per pixel of horizontal lag
pub const FOLLOWER_TILT: f32 = 0.05;

/// Follower disc radius
pub const FOLLOWER_RADIUS: f32 = 18.0;

/// Width of the follower's outer ring
pub const FOLLOWER_RING: f32 = 6.0;
