//! Particle field simulation
//!
//! The field owns its particles and the pointer position. One display frame
//! is a [`ParticleField::tick`] followed by [`ParticleField::build_scene`];
//! [`ParticleField::frame`] does both.

use crate::{FieldParams, Scene};
use glam::Vec2;
use particle_physics::{Hsla, Particle};
use rand::Rng;

/// Pointer-reactive particle field
pub struct ParticleField {
    params: FieldParams,
    particles: Vec<Particle>,
    bounds: Vec2,
    pointer: Option<Vec2>,
    global_hue: f32,
    frame_count: u64,
}

impl ParticleField {
    /// Seed `params.particle_count` particles across a `width` x `height` surface
    pub fn new(params: FieldParams, width: f32, height: f32) -> Self {
        Self::with_rng(params, width, height, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        params: FieldParams,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let particles = (0..params.particle_count)
            .map(|_| Particle::random(rng, width, height))
            .collect();

        log::info!(
            "Seeded {} particles on a {}x{} surface",
            params.particle_count,
            width,
            height
        );

        Self::from_particles(params, width, height, particles)
    }

    /// Adopt an existing particle set; `params.particle_count` is updated to match
    /// and each particle is raised to the scale and opacity floors of `params`
    pub fn from_particles(
        mut params: FieldParams,
        width: f32,
        height: f32,
        mut particles: Vec<Particle>,
    ) -> Self {
        params.particle_count = particles.len();
        for particle in &mut particles {
            particle.scale = particle.scale.max(params.scale_floor);
            particle.opacity = particle.opacity.clamp(params.opacity_floor, 1.0);
        }

        Self {
            params,
            particles,
            bounds: Vec2::new(width, height),
            pointer: None,
            global_hue: 0.0,
            frame_count: 0,
        }
    }

    /// Latest pointer position in surface pixels. May lag the rendered frame by one.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Update the reflection bounds. Particles are not re-seeded, so they may
    /// sit outside a shrunken surface until their velocity carries them back.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!(
            "Field resized {}x{} -> {}x{}",
            self.bounds.x,
            self.bounds.y,
            width,
            height
        );
        self.bounds = Vec2::new(width, height);
    }

    /// Advance the palette and every particle by one frame
    pub fn tick(&mut self) {
        self.global_hue = (self.global_hue + self.params.global_hue_step) % 360.0;

        for particle in &mut self.particles {
            advance_particle(
                particle,
                &self.params,
                self.bounds,
                self.pointer,
                self.global_hue,
            );
        }

        self.frame_count += 1;
    }

    /// Rebuild `scene` from the current particle state
    pub fn build_scene(&self, scene: &mut Scene) {
        let params = &self.params;
        scene.clear();

        for (i, particle) in self.particles.iter().enumerate() {
            let color = Hsla::new(
                particle.hue,
                params.saturation,
                params.lightness,
                particle.opacity,
            );
            let radius = particle.radius();

            if particle.scale > params.glow_scale_threshold {
                scene.push_circle(
                    particle.position,
                    radius + params.glow_blur,
                    params.glow_blur,
                    color
                        .with_alpha(particle.opacity * params.glow_opacity)
                        .to_linear_rgba(),
                );
            }
            scene.push_circle(particle.position, radius, 0.0, color.to_linear_rgba());

            // O(n^2): every pair is visited once
            for other in &self.particles[i + 1..] {
                let distance = particle.position.distance(other.position);
                if distance < params.link_threshold {
                    let hue = (particle.hue + other.hue) / 2.0;
                    let alpha = params.link_max_opacity * (1.0 - distance / params.link_threshold);
                    let link_color = Hsla::new(hue, params.saturation, params.lightness, alpha);

                    scene.push_link(
                        particle.position,
                        other.position,
                        link_color.to_linear_rgba(),
                    );
                }
            }
        }
    }

    /// One display frame: advance, then redraw from scratch
    pub fn frame(&mut self, scene: &mut Scene) {
        self.tick();
        self.build_scene(scene);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Baseline palette hue in degrees
    pub fn global_hue(&self) -> f32 {
        self.global_hue
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Advance a single particle by one frame.
///
/// Returns `true` if the pointer pushed it this frame.
pub fn advance_particle(
    particle: &mut Particle,
    params: &FieldParams,
    bounds: Vec2,
    pointer: Option<Vec2>,
    global_hue: f32,
) -> bool {
    particle.position += particle.velocity;

    // Elastic walls: point the velocity back inside, never clamp the position
    if particle.position.x < 0.0 {
        particle.velocity.x = particle.velocity.x.abs();
    } else if particle.position.x > bounds.x {
        particle.velocity.x = -particle.velocity.x.abs();
    }
    if particle.position.y < 0.0 {
        particle.velocity.y = particle.velocity.y.abs();
    } else if particle.position.y > bounds.y {
        particle.velocity.y = -particle.velocity.y.abs();
    }

    let mut repelled = false;
    if let Some(pointer) = pointer {
        let delta = pointer - particle.position;
        let distance = delta.length();

        if distance < params.interaction_radius {
            let proximity = (params.interaction_radius - distance) / params.interaction_radius;
            let angle = delta.y.atan2(delta.x);
            particle.velocity -=
                Vec2::new(angle.cos(), angle.sin()) * proximity * params.repulsion_strength;

            particle.hue = (global_hue + proximity * params.proximity_hue_shift).rem_euclid(360.0);
            particle.scale = params.scale_floor + proximity * params.proximity_scale_gain;
            particle.opacity = (params.proximity_opacity_base
                + proximity * params.proximity_opacity_gain)
                .clamp(params.opacity_floor, 1.0);
            repelled = true;
        }
    }

    if !repelled {
        particle.scale = (particle.scale * params.scale_decay).max(params.scale_floor);
        particle.opacity = (particle.opacity * params.opacity_decay).max(params.opacity_floor);
        particle.hue = (particle.hue + params.ambient_hue_step) % 360.0;
    }

    particle.velocity *= params.velocity_damping;

    repelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::constants::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WIDTH: f32 = 1920.0;
    const HEIGHT: f32 = 1080.0;

    fn seeded_field(seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::with_rng(FieldParams::default(), WIDTH, HEIGHT, &mut rng)
    }

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField::from_particles(FieldParams::default(), WIDTH, HEIGHT, particles)
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, 0.5, 90.0)
    }

    #[test]
    fn test_seeds_default_count() {
        let field = seeded_field(1);
        assert_eq!(field.particle_count(), PARTICLE_COUNT);
        assert_eq!(field.pointer(), None);
        assert_eq!(field.bounds(), Vec2::new(WIDTH, HEIGHT));
    }

    #[test]
    fn test_particle_count_constant() {
        let mut field = seeded_field(2);
        let mut scene = Scene::new();

        for frame in 0..300 {
            field.set_pointer((frame * 7 % 1920) as f32, (frame * 3 % 1080) as f32);
            if frame == 150 {
                field.resize(800.0, 600.0);
            }
            field.frame(&mut scene);
            assert_eq!(field.particle_count(), PARTICLE_COUNT);
        }
        assert_eq!(field.frame_count(), 300);
    }

    #[test]
    fn test_velocity_damped_without_pointer() {
        let mut field = seeded_field(3);

        for _ in 0..500 {
            let before: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();
            field.tick();
            for (old, p) in before.iter().zip(field.particles()) {
                assert!(p.velocity.x.abs() < old.x.abs() || old.x == 0.0);
                assert!(p.velocity.y.abs() < old.y.abs() || old.y == 0.0);
            }
        }
    }

    #[test]
    fn test_velocity_damped_on_ticks_without_impulse() {
        let params = FieldParams::default();
        let bounds = Vec2::new(WIDTH, HEIGHT);
        let mut rng = StdRng::seed_from_u64(4);
        let mut particles: Vec<Particle> = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(&mut rng, WIDTH, HEIGHT))
            .collect();

        for frame in 0..400 {
            let pointer = Some(Vec2::new((frame * 13 % 1920) as f32, 540.0));
            for p in &mut particles {
                let old = p.velocity;
                let repelled = advance_particle(p, &params, bounds, pointer, 0.0);
                if !repelled {
                    assert!(p.velocity.x.abs() < old.x.abs() || old.x == 0.0);
                    assert!(p.velocity.y.abs() < old.y.abs() || old.y == 0.0);
                }
            }
        }
    }

    #[test]
    fn test_positions_stay_within_one_step_of_bounds() {
        // Small surface so that walls are hit constantly
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::with_rng(FieldParams::default(), 60.0, 40.0, &mut rng);

        for _ in 0..3000 {
            field.tick();
            for p in field.particles() {
                assert!(p.position.x >= -SEED_MAX_SPEED && p.position.x <= 60.0 + SEED_MAX_SPEED);
                assert!(p.position.y >= -SEED_MAX_SPEED && p.position.y <= 40.0 + SEED_MAX_SPEED);
            }
        }
    }

    #[test]
    fn test_wall_reflects_velocity() {
        let left = Particle::new(Vec2::new(0.1, 50.0), Vec2::new(-0.2, 0.0), 2.0, 0.5, 0.0);
        let right = Particle::new(Vec2::new(99.9, 50.0), Vec2::new(0.2, 0.0), 2.0, 0.5, 0.0);
        let mut field =
            ParticleField::from_particles(FieldParams::default(), 100.0, 100.0, vec![left, right]);

        field.tick();
        let [l, r] = [field.particles()[0], field.particles()[1]];
        assert!(l.position.x < 0.0 && l.velocity.x > 0.0);
        assert!(r.position.x > 100.0 && r.velocity.x < 0.0);

        field.tick();
        let [l, r] = [field.particles()[0], field.particles()[1]];
        assert!(l.position.x >= 0.0);
        assert!(r.position.x <= 100.0);
    }

    #[test]
    fn test_floors_hold_under_interaction() {
        let mut field = seeded_field(6);

        for frame in 0..1000 {
            let t = frame as f32 * 0.05;
            field.set_pointer(960.0 + t.cos() * 600.0, 540.0 + t.sin() * 400.0);
            field.tick();

            for p in field.particles() {
                assert!(p.scale >= 1.0);
                assert!(p.scale >= SCALE_FLOOR);
                assert!(p.opacity >= OPACITY_FLOOR && p.opacity <= 1.0);
                assert!((0.0..360.0).contains(&p.hue));
            }
        }
    }

    #[test]
    fn test_pointer_on_particle_grows_scale() {
        let mut field = field_of(vec![still(500.0, 500.0)]);
        field.set_pointer(500.0, 500.0);

        let before = field.particles()[0].scale;
        field.tick();
        let p = field.particles()[0];

        assert!(p.scale > before);
        assert_eq!(p.scale, 1.0 + PROXIMITY_SCALE_GAIN);
        assert_eq!(p.opacity, 1.0);
        assert!(p.velocity.length() > 0.0);
    }

    #[test]
    fn test_repulsion_points_away_from_pointer() {
        let mut field = field_of(vec![still(100.0, 100.0)]);
        field.set_pointer(150.0, 100.0);
        field.tick();

        let p = field.particles()[0];
        let force = (INTERACTION_RADIUS - 50.0) / INTERACTION_RADIUS;
        let expected = -force * REPULSION_STRENGTH * VELOCITY_DAMPING;

        assert!((p.velocity.x - expected).abs() < 1e-5);
        assert!(p.velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_hue_shifts_with_proximity() {
        let mut field = field_of(vec![still(100.0, 100.0)]);
        field.set_pointer(100.0, 175.0);
        field.tick();

        let proximity = 1.0 - 75.0 / INTERACTION_RADIUS;
        let expected = (GLOBAL_HUE_STEP + proximity * PROXIMITY_HUE_SHIFT) % 360.0;
        let p = field.particles()[0];

        assert!((p.hue - expected).abs() < 1e-4);
        assert!((p.scale - (1.0 + proximity * PROXIMITY_SCALE_GAIN)).abs() < 1e-5);
        assert!((p.opacity - (0.8 + proximity * 0.2)).abs() < 1e-5);
    }

    #[test]
    fn test_resting_hue_drifts() {
        let mut field = field_of(vec![still(10.0, 10.0)]);
        field.particles[0].hue = 359.75;
        field.tick();
        assert!((field.particles()[0].hue - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_global_hue_wraps() {
        let mut field = field_of(vec![]);
        for _ in 0..720 {
            field.tick();
        }
        assert_eq!(field.global_hue(), 0.0);
        field.tick();
        assert_eq!(field.global_hue(), GLOBAL_HUE_STEP);
    }

    #[test]
    fn test_seed_scenario_far_pointer_relaxes() {
        let mut rng = StdRng::seed_from_u64(8);
        let particles: Vec<Particle> = (0..150)
            .map(|_| {
                let mut p = Particle::random(&mut rng, WIDTH, HEIGHT);
                // Keep everything well outside the radius around (0, 0)
                p.position.x = 160.0 + rng.random::<f32>() * (WIDTH - 160.0);
                p.scale = 1.0 + rng.random::<f32>() * 2.0;
                p.opacity = 0.3 + rng.random::<f32>() * 0.7;
                p
            })
            .collect();

        let mut field = field_of(particles);
        field.set_pointer(0.0, 0.0);

        let before = field.particles().to_vec();
        field.tick();

        assert_eq!(field.particle_count(), 150);
        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(new.scale, (old.scale * 0.95).max(1.0));
            assert_eq!(new.opacity, (old.opacity * 0.98).max(0.3));
        }
    }

    #[test]
    fn test_no_pointer_means_no_interaction() {
        let mut field = field_of(vec![still(0.0, 0.0)]);
        field.particles[0].scale = 2.0;
        field.tick();
        assert_eq!(field.particles()[0].scale, 1.9);
    }

    #[test]
    fn test_distant_particles_not_linked() {
        let field = field_of(vec![still(100.0, 100.0), still(221.0, 100.0), still(400.0, 400.0)]);
        let mut scene = Scene::new();
        field.build_scene(&mut scene);

        assert_eq!(scene.link_count(), 0);
        assert_eq!(scene.circles.len(), 3);
    }

    #[test]
    fn test_near_particles_linked_with_mean_hue() {
        let mut a = still(100.0, 100.0);
        let mut b = still(100.0, 160.0);
        a.hue = 10.0;
        b.hue = 350.0;
        let field = field_of(vec![a, b]);

        let mut scene = Scene::new();
        field.build_scene(&mut scene);

        assert_eq!(scene.link_count(), 1);
        let alpha = LINK_MAX_OPACITY * (1.0 - 60.0 / LINK_THRESHOLD);
        let expected = Hsla::new(180.0, SATURATION, LIGHTNESS, alpha).to_linear_rgba();
        assert_eq!(scene.links[0].color, expected);
        assert_eq!(scene.links[0].position, [100.0, 100.0]);
        assert_eq!(scene.links[1].position, [100.0, 160.0]);
    }

    #[test]
    fn test_link_threshold_is_strict() {
        let field = field_of(vec![still(0.0, 0.0), still(LINK_THRESHOLD, 0.0)]);
        let mut scene = Scene::new();
        field.build_scene(&mut scene);
        assert_eq!(scene.link_count(), 0);
    }

    #[test]
    fn test_glow_drawn_beneath_scaled_particle() {
        let mut glowing = still(100.0, 100.0);
        glowing.scale = 2.0;
        let field = field_of(vec![glowing, still(900.0, 900.0)]);

        let mut scene = Scene::new();
        field.build_scene(&mut scene);

        assert_eq!(scene.circles.len(), 3);
        let glow = scene.circles[0];
        let dot = scene.circles[1];
        assert_eq!(glow.softness, GLOW_BLUR);
        assert_eq!(glow.radius, 4.0 + GLOW_BLUR);
        assert_eq!(glow.color[3], 0.5 * GLOW_OPACITY);
        assert_eq!(dot.softness, 0.0);
        assert_eq!(dot.radius, 4.0);
        assert_eq!(dot.color[3], 0.5);
        assert_eq!(scene.circles[2].radius, 2.0);
    }

    #[test]
    fn test_scene_follows_tuned_params() {
        let params = FieldParams {
            glow_scale_threshold: 2.0,
            saturation: 0.2,
            ..Default::default()
        };
        let mut particle = still(100.0, 100.0);
        particle.scale = 1.5;
        let field = ParticleField::from_particles(params, WIDTH, HEIGHT, vec![particle]);

        let mut scene = Scene::new();
        field.build_scene(&mut scene);

        // 1.5 is above the default glow threshold but below the tuned one
        assert_eq!(scene.circles.len(), 1);
        let expected = Hsla::new(90.0, 0.2, LIGHTNESS, 0.5).to_linear_rgba();
        assert_eq!(scene.circles[0].color, expected);
        assert_eq!(scene.circles[0].radius, 3.0);
    }

    #[test]
    fn test_adopted_particles_raised_to_param_floors() {
        let params = FieldParams {
            opacity_floor: 0.6,
            ..Default::default()
        };
        let faint = Particle::new(Vec2::ZERO, Vec2::ZERO, 2.0, 0.1, 0.0);
        let mut shrunk = still(50.0, 50.0);
        shrunk.scale = 0.5;

        let field = ParticleField::from_particles(params, WIDTH, HEIGHT, vec![faint, shrunk]);

        assert_eq!(field.particles()[0].opacity, 0.6);
        assert_eq!(field.particles()[1].opacity, 0.6);
        assert_eq!(field.particles()[1].scale, SCALE_FLOOR);
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let first = seeded_field(42);
        let second = seeded_field(42);
        assert_eq!(first.particles(), second.particles());

        let other = seeded_field(43);
        assert_ne!(first.particles(), other.particles());
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut field = seeded_field(9);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();

        field.resize(640.0, 480.0);

        assert_eq!(field.bounds(), Vec2::new(640.0, 480.0));
        assert_eq!(field.particle_count(), PARTICLE_COUNT);
        for (old, p) in before.iter().zip(field.particles()) {
            assert_eq!(*old, p.position);
        }
    }

    #[test]
    fn test_frame_rebuilds_scene() {
        let mut field = seeded_field(10);
        let mut scene = Scene::new();

        field.frame(&mut scene);
        let first = scene.circles.len();
        field.frame(&mut scene);

        assert_eq!(first, PARTICLE_COUNT);
        assert_eq!(scene.circles.len(), PARTICLE_COUNT);
        assert!(scene.link_count() <= PARTICLE_COUNT * (PARTICLE_COUNT - 1) / 2);
    }
}
