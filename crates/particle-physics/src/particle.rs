//! Particle record for the pointer-reactive field

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

/// One animated point of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels
    pub position: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    /// Base draw radius, fixed at creation
    pub size: f32,
    /// In `[0, 1]`; the field raises it to its opacity floor
    pub opacity: f32,
    /// Degrees in `[0, 360)`
    pub hue: f32,
    /// Draw radius multiplier, never below `SCALE_FLOOR`
    pub scale: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, opacity: f32, hue: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            opacity: opacity.clamp(0.0, 1.0),
            hue: hue.rem_euclid(360.0),
            scale: SCALE_FLOOR,
        }
    }

    /// Seed a particle somewhere inside a `width` x `height` surface
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let position = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * SEED_MAX_SPEED,
            (rng.random::<f32>() - 0.5) * 2.0 * SEED_MAX_SPEED,
        );
        let size = SEED_MIN_SIZE + rng.random::<f32>() * (SEED_MAX_SIZE - SEED_MIN_SIZE);
        let opacity =
            SEED_MIN_OPACITY + rng.random::<f32>() * (SEED_MAX_OPACITY - SEED_MIN_OPACITY);
        let hue = rng.random::<f32>() * 360.0;

        Self::new(position, velocity, size, opacity, hue)
    }

    /// Current draw radius
    pub fn radius(&self) -> f32 {
        self.size * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_particle_within_seed_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 1920.0, 1080.0);
            assert!((0.0..1920.0).contains(&p.position.x));
            assert!((0.0..1080.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= SEED_MAX_SPEED);
            assert!(p.velocity.y.abs() <= SEED_MAX_SPEED);
            assert!((SEED_MIN_SIZE..SEED_MAX_SIZE).contains(&p.size));
            assert!((SEED_MIN_OPACITY..=SEED_MAX_OPACITY).contains(&p.opacity));
            assert!((0.0..360.0).contains(&p.hue));
            assert_eq!(p.scale, 1.0);
        }
    }

    #[test]
    fn test_random_particle_on_empty_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::random(&mut rng, 0.0, 0.0);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn test_new_wraps_hue_and_clamps_opacity() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, 1.5, 370.0);
        assert_eq!(p.opacity, 1.0);
        assert!((p.hue - 10.0).abs() < 1e-4);

        // Floors belong to the field parameters, not the record
        let faint = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, 0.05, -30.0);
        assert_eq!(faint.opacity, 0.05);
        assert!((faint.hue - 330.0).abs() < 1e-4);
    }

    #[test]
    fn test_radius_follows_scale() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, 0.5, 0.0);
        assert_eq!(p.radius(), 2.0);
        p.scale = 1.25;
        assert_eq!(p.radius(), 2.5);
    }
}
